use bytemuck::{Pod, Zeroable};

use super::ShapeKind;

/// Fixed-width shape record read by the shader via `instance_index`.
///
/// `colors` packs the main color index in the low 16 bits and the style
/// (second color, or unused) in the high 16 bits. `data` is the per-shape
/// payload; see the shape encoders under `scene::shapes`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Pod, Zeroable)]
pub struct Param {
    pub kind: u32,
    pub colors: u32,
    pub depth: i32,
    pub data: [i32; 5],
}

impl Param {
    #[inline]
    pub fn new(kind: ShapeKind, color: u16, style: u16, depth: i16, data: [i32; 5]) -> Self {
        Self {
            kind: kind as u32,
            colors: color as u32 | (style as u32) << 16,
            depth: depth as i32,
            data,
        }
    }

    /// Continuation record for shapes spanning several params.
    #[inline]
    pub fn extra(kind: ShapeKind, data: [i32; 5]) -> Self {
        Self { kind: kind as u32, colors: 0, depth: 0, data }
    }

    #[inline]
    pub fn color(&self) -> u16 {
        self.colors as u16
    }

    #[inline]
    pub fn style(&self) -> u16 {
        (self.colors >> 16) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_32_bytes() {
        assert_eq!(size_of::<Param>(), 32);
    }

    #[test]
    fn colors_pack_low_and_high_halves() {
        let p = Param::new(ShapeKind::Box, 0x0012, 0xabcd, -3, [0; 5]);
        assert_eq!(p.colors, 0xabcd_0012);
        assert_eq!((p.color(), p.style()), (0x12, 0xabcd));
        assert_eq!(p.depth, -3);
        assert_eq!(p.kind, 0);
    }
}
