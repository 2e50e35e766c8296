use crate::coords::Pixel;
use crate::scene::{CommandBatch, Param, ShapeKind};

impl CommandBatch {
    /// Records one glyph quad with its top-left at `pos`.
    ///
    /// `shift` is added to every non-transparent glyph pixel's color index.
    #[inline]
    pub fn push_glyph(&mut self, glyph: u32, shift: i16, depth: i16, pos: Pixel) -> bool {
        let data = [glyph as i32, pos.x as i32, pos.y as i32, 0, 0];
        self.push(
            ShapeKind::Glyph,
            &[Param::new(ShapeKind::Glyph, shift as u16, 0, depth, data)],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_shift_survives_packing() {
        let mut batch = CommandBatch::default();
        batch.push_glyph(42, -2, 0, Pixel::new(3, 4));

        let p = batch.params()[0];
        assert_eq!(p.color() as i16, -2);
        assert_eq!(p.data[..3], [42, 3, 4]);
    }
}
