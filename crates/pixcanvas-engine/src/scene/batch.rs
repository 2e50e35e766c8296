use super::{DrawCmd, DrawIndirect, Param, ShapeKind};

/// Per-canvas command and parameter limits, fixed at creation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Capacity {
    pub commands: u32,
    pub params: u32,
}

impl Capacity {
    #[inline]
    pub const fn new(commands: u32, params: u32) -> Self {
        Self { commands, params }
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self::new(1024, 2048)
    }
}

/// Commands and parameters recorded for one canvas during one frame.
///
/// Performance characteristics:
/// - `push()` is O(1) and never allocates (storage is reserved up front)
/// - `clear()` keeps the allocation for the next frame
///
/// Overflow policy: a shape that does not fit is dropped whole, counted in
/// [`dropped`](Self::dropped), and logged once until [`new_frame`](Self::new_frame).
#[derive(Debug)]
pub struct CommandBatch {
    capacity: Capacity,
    cmds: Vec<DrawCmd>,
    params: Vec<Param>,

    dropped: u32,
    pub(crate) warned: bool,
}

impl CommandBatch {
    pub fn new(capacity: Capacity) -> Self {
        Self {
            capacity,
            cmds: Vec::with_capacity(capacity.commands as usize),
            params: Vec::with_capacity(capacity.params as usize),
            dropped: 0,
            warned: false,
        }
    }

    /// Appends one shape. Returns `false` if it was dropped for lack of room.
    pub fn push(&mut self, kind: ShapeKind, params: &[Param]) -> bool {
        debug_assert_eq!(params.len(), kind.param_count(), "wrong param count for {kind:?}");

        let cmds_full = self.cmds.len() >= self.capacity.commands as usize;
        let params_full = self.params.len() + params.len() > self.capacity.params as usize;
        if cmds_full || params_full {
            self.reject(kind);
            return false;
        }

        let base = self.params.len() as u32;
        self.params.extend_from_slice(params);
        self.cmds.push(DrawCmd::new(kind, base));
        true
    }

    fn reject(&mut self, kind: ShapeKind) {
        self.dropped += 1;
        if !self.warned {
            self.warned = true;
            log::warn!(
                "command batch full ({} commands, {} params): dropping {kind:?} and further shapes this frame",
                self.capacity.commands,
                self.capacity.params,
            );
        }
    }

    /// Recorded commands in issue order.
    #[inline]
    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    #[inline]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Indirect-draw records for every command, in issue order.
    pub fn indirect(&self) -> impl ExactSizeIterator<Item = DrawIndirect> + '_ {
        self.cmds.iter().map(DrawCmd::indirect)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Shapes rejected since the last [`new_frame`](Self::new_frame).
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Empties the batch. Keeps allocated storage.
    #[inline]
    pub fn clear(&mut self) {
        self.cmds.clear();
        self.params.clear();
    }

    /// Frame boundary: re-arms the overflow warning.
    #[inline]
    pub fn new_frame(&mut self) {
        self.dropped = 0;
        self.warned = false;
    }
}

impl Default for CommandBatch {
    fn default() -> Self {
        Self::new(Capacity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Pixel;
    use crate::palette::ColorIndex;

    #[test]
    fn commands_keep_call_order_and_param_offsets() {
        let mut batch = CommandBatch::default();
        let c = ColorIndex(3);
        assert!(batch.push_line(c, 0, Pixel::new(0, 0), Pixel::new(4, 4)));
        assert!(batch.push_triangle(c, 0, Pixel::new(0, 0), Pixel::new(4, 0), Pixel::new(0, 4)));
        assert!(batch.push_point(c, 0, Pixel::new(1, 1)));

        let kinds: Vec<ShapeKind> = batch.commands().iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ShapeKind::Line, ShapeKind::Triangle, ShapeKind::Box]);

        let bases: Vec<u32> = batch.indirect().map(|r| r.first_instance).collect();
        assert_eq!(bases, vec![0, 1, 3]);
        assert_eq!(batch.params().len(), 4);
    }

    #[test]
    fn n_calls_give_n_commands() {
        let mut batch = CommandBatch::default();
        for i in 0..100 {
            batch.push_point(ColorIndex(1), 0, Pixel::new(i, 0));
        }
        assert_eq!(batch.len(), 100);
        assert!(batch.indirect().all(|r| r.instance_count == 1 && r.vertex_count == 4));
    }

    #[test]
    fn overflow_drops_without_exceeding_capacity() {
        let mut batch = CommandBatch::new(Capacity::new(2, 8));
        let c = ColorIndex(1);
        assert!(batch.push_point(c, 0, Pixel::zero()));
        assert!(batch.push_point(c, 0, Pixel::zero()));
        assert!(!batch.warned);

        assert!(!batch.push_point(c, 0, Pixel::zero()));
        assert!(batch.warned);
        assert_eq!(batch.dropped(), 1);

        // Later drops only count; the flag stays set so nothing is logged again.
        assert!(!batch.push_line(c, 0, Pixel::zero(), Pixel::new(1, 1)));
        assert!(batch.warned);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.dropped(), 2);

        batch.clear();
        batch.new_frame();
        assert_eq!(batch.dropped(), 0);
        assert!(!batch.warned);
        assert!(batch.push_point(c, 0, Pixel::zero()));
    }

    #[test]
    fn multi_param_shape_is_dropped_whole() {
        let mut batch = CommandBatch::new(Capacity::new(8, 2));
        let c = ColorIndex(1);
        assert!(batch.push_point(c, 0, Pixel::zero()));
        assert!(!batch.push_triangle(c, 0, Pixel::zero(), Pixel::new(1, 0), Pixel::new(0, 1)));
        assert_eq!(batch.params().len(), 1);
        // A single-param shape still fits in the remaining slot.
        assert!(batch.push_point(c, 0, Pixel::zero()));
        assert_eq!(batch.params().len(), 2);
    }
}
