use bytemuck::{Pod, Zeroable};

use super::ShapeKind;

/// One recorded shape: template plus the offset of its first parameter.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawCmd {
    pub kind: ShapeKind,
    pub vertex_count: u32,
    pub instance_count: u32,
    /// Index of the first [`Param`](super::Param) of this shape.
    pub base: u32,
}

impl DrawCmd {
    #[inline]
    pub fn new(kind: ShapeKind, base: u32) -> Self {
        Self {
            kind,
            vertex_count: kind.vertex_count(),
            instance_count: 1,
            base,
        }
    }

    /// Indirect-draw record; the base parameter offset travels as `first_instance`.
    #[inline]
    pub fn indirect(&self) -> DrawIndirect {
        DrawIndirect {
            vertex_count: self.vertex_count,
            instance_count: self.instance_count,
            first_vertex: 0,
            first_instance: self.base,
        }
    }
}

/// GPU layout of a non-indexed indirect draw (16 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Pod, Zeroable)]
pub struct DrawIndirect {
    pub vertex_count: u32,
    pub instance_count: u32,
    pub first_vertex: u32,
    pub first_instance: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indirect_record_layout() {
        assert_eq!(size_of::<DrawIndirect>(), 16);

        let cmd = DrawCmd::new(ShapeKind::Line, 7);
        let rec = cmd.indirect();
        assert_eq!(bytemuck::cast::<DrawIndirect, [u32; 4]>(rec), [2, 1, 0, 7]);
    }
}
