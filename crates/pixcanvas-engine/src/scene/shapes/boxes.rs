use crate::coords::Pixel;
use crate::palette::ColorIndex;
use crate::scene::{CommandBatch, Param, ShapeKind};

impl CommandBatch {
    /// Records a box spanning `p1..=p2` (corners in any order).
    ///
    /// The one-pixel border uses `fg`, the interior `bg`; either may be
    /// transparent. `corner` chamfers each corner by that many pixels.
    pub fn push_box(
        &mut self,
        fg: ColorIndex,
        bg: ColorIndex,
        corner: i16,
        depth: i16,
        p1: Pixel,
        p2: Pixel,
    ) -> bool {
        let lo = p1.min(p2);
        let hi = p1.max(p2);
        let data = [lo.x as i32, lo.y as i32, hi.x as i32, hi.y as i32, corner.max(0) as i32];
        self.push(
            ShapeKind::Box,
            &[Param::new(ShapeKind::Box, fg.0 as u16, bg.0 as u16, depth, data)],
        )
    }

    /// Records a single pixel (a 1×1 box).
    #[inline]
    pub fn push_point(&mut self, color: ColorIndex, depth: i16, p: Pixel) -> bool {
        self.push_box(color, color, 0, depth, p, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_corners_are_normalized() {
        let mut batch = CommandBatch::default();
        batch.push_box(ColorIndex(6), ColorIndex(0), 3, 2, Pixel::new(10, 2), Pixel::new(4, 8));

        let p = batch.params()[0];
        assert_eq!(p.kind, ShapeKind::Box as u32);
        assert_eq!(p.data, [4, 2, 10, 8, 3]);
        assert_eq!((p.color(), p.style(), p.depth), (6, 0, 2));
    }

    #[test]
    fn point_is_unit_box() {
        let mut batch = CommandBatch::default();
        batch.push_point(ColorIndex(9), -1, Pixel::new(5, 7));

        let p = batch.params()[0];
        assert_eq!(p.data, [5, 7, 5, 7, 0]);
        assert_eq!((p.color(), p.style()), (9, 9));
        assert_eq!(batch.commands()[0].kind, ShapeKind::Box);
    }
}
