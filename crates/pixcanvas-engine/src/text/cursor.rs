use crate::assets::{Assets, Font, FontId};
use crate::coords::Pixel;
use crate::palette::ColorIndex;
use crate::scene::CommandBatch;

/// Per-canvas text layout state.
///
/// `position.y` is the baseline row; glyphs are placed so that the font's
/// baseline lands on it. A newline returns to `margin`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TextCursor {
    pub color: ColorIndex,
    pub font: Option<FontId>,
    pub margin: i16,
    pub letter_spacing: i16,
    /// Row advance on newline. `0` means 1.25× the font height.
    pub interline: i16,
    pub depth: i16,
    pub position: Pixel,
}

impl TextCursor {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects color and font. Sets the interline from the font if unset.
    pub fn text(&mut self, color: ColorIndex, id: FontId, font: &Font) {
        self.color = color;
        self.font = Some(id);
        if self.interline == 0 {
            self.interline = font.default_interline();
        }
    }

    /// Moves to `p` and makes `p.x` the margin. Emits nothing.
    #[inline]
    pub fn locate(&mut self, p: Pixel) {
        self.position = p;
        self.margin = p.x;
    }

    /// Lays out one character.
    ///
    /// Returns `false` if a glyph should have been emitted but was not
    /// (no font selected, or the batch is full).
    pub fn put_char(&mut self, ch: char, assets: &Assets, batch: &mut CommandBatch) -> bool {
        let font = self.font.and_then(|id| assets.font(id));

        if ch == '\n' {
            let advance = match (self.interline, font) {
                (0, Some(f)) => f.default_interline(),
                (n, _) => n,
            };
            self.position.x = self.margin;
            self.position.y = self.position.y.wrapping_add(advance);
            return true;
        }

        let Some(font) = font else {
            return false;
        };

        let glyph = font.glyph(ch);
        let Some(width) = assets.glyph(glyph).map(|e| e.w) else {
            self.position.x = self.position.x.wrapping_add(self.letter_spacing);
            return true;
        };
        let shift = self.color.0 as i16 - font.base_color as i16;
        let top_left = Pixel::new(self.position.x, self.position.y.wrapping_sub(font.baseline));

        let pushed = batch.push_glyph(glyph, shift, self.depth, top_left);
        self.position.x = self.position.x.wrapping_add(width + self.letter_spacing);
        pushed
    }

    /// Lays out every character of `s`. Returns the number of glyphs emitted.
    pub fn print(&mut self, s: &str, assets: &Assets, batch: &mut CommandBatch) -> usize {
        let before = batch.len();
        for ch in s.chars() {
            self.put_char(ch, assets, batch);
        }
        batch.len() - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ShapeKind;
    use crate::test_support::assets_with_font;

    #[test]
    fn newline_returns_to_margin_and_advances_interline() {
        let (assets, font) = assets_with_font();
        let mut batch = CommandBatch::default();

        let mut cursor = TextCursor {
            font: Some(font),
            color: ColorIndex(5),
            letter_spacing: 1,
            interline: 10,
            ..TextCursor::default()
        };
        cursor.locate(Pixel::new(2, 8));

        cursor.put_char('A', &assets, &mut batch);
        assert_eq!(cursor.position, Pixel::new(9, 8));
        cursor.put_char('\n', &assets, &mut batch);
        assert_eq!(cursor.position, Pixel::new(2, 18));
        cursor.put_char('B', &assets, &mut batch);
        assert_eq!(cursor.position, Pixel::new(8, 18));

        assert_eq!(batch.len(), 2);
        let a = batch.params()[0];
        assert_eq!(a.data[..3], [assets.font(font).unwrap().glyph('A') as i32, 2, 2]);
        // Color 5 relative to base color 2.
        assert_eq!(a.color() as i16, 3);
        assert_eq!(batch.commands()[1].kind, ShapeKind::Glyph);
    }

    #[test]
    fn text_initializes_interline_once() {
        let (assets, id) = assets_with_font();
        let font = assets.font(id).unwrap();

        let mut cursor = TextCursor::new();
        cursor.text(ColorIndex(3), id, font);
        assert_eq!(cursor.interline, 10);

        cursor.interline = 12;
        cursor.text(ColorIndex(4), id, font);
        assert_eq!(cursor.interline, 12);
    }

    #[test]
    fn unset_interline_falls_back_to_font_height() {
        let (assets, font) = assets_with_font();
        let mut batch = CommandBatch::default();
        let mut cursor = TextCursor { font: Some(font), ..TextCursor::default() };

        cursor.print("\n", &assets, &mut batch);
        assert_eq!(cursor.position.y, 10);
        assert!(batch.is_empty());
    }

    #[test]
    fn without_font_nothing_is_emitted() {
        let (assets, _) = assets_with_font();
        let mut batch = CommandBatch::default();
        let mut cursor = TextCursor::new();

        assert!(!cursor.put_char('A', &assets, &mut batch));
        assert_eq!(cursor.print("hello", &assets, &mut batch), 0);
        assert_eq!(cursor.position, Pixel::zero());
    }

    #[test]
    fn locate_emits_nothing() {
        let mut cursor = TextCursor::new();
        cursor.locate(Pixel::new(7, 3));
        assert_eq!((cursor.position, cursor.margin), (Pixel::new(7, 3), 7));
    }
}
