use crate::coords::Pixel;
use crate::palette::ColorIndex;
use crate::scene::{CommandBatch, Param, ShapeKind};

impl CommandBatch {
    /// Records a one-pixel line segment from `a` to `b`.
    #[inline]
    pub fn push_line(&mut self, color: ColorIndex, depth: i16, a: Pixel, b: Pixel) -> bool {
        let data = [a.x as i32, a.y as i32, b.x as i32, b.y as i32, 0];
        self.push(
            ShapeKind::Line,
            &[Param::new(ShapeKind::Line, color.0 as u16, 0, depth, data)],
        )
    }
}
