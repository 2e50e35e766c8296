use std::fmt;

use crate::assets::{Assets, FontId};
use crate::coords::Pixel;
use crate::palette::ColorIndex;
use crate::scene::CommandBatch;

use super::TextCursor;

/// A canvas's text cursor bound to its batch and the font registry.
///
/// Obtained from [`PixelContext::text`](crate::context::PixelContext::text).
/// Implements [`fmt::Write`], so `write!`/`writeln!` lay out text directly.
pub struct TextWriter<'a> {
    cursor: &'a mut TextCursor,
    batch: &'a mut CommandBatch,
    assets: &'a Assets,
}

impl<'a> TextWriter<'a> {
    pub(crate) fn new(cursor: &'a mut TextCursor, batch: &'a mut CommandBatch, assets: &'a Assets) -> Self {
        Self { cursor, batch, assets }
    }

    /// Selects color and font. Unknown fonts are ignored with a warning.
    pub fn text(&mut self, color: ColorIndex, font: FontId) -> &mut Self {
        match self.assets.font(font) {
            Some(f) => self.cursor.text(color, font, f),
            None => log::warn!("text: unknown font {font:?}"),
        }
        self
    }

    #[inline]
    pub fn locate(&mut self, p: Pixel) -> &mut Self {
        self.cursor.locate(p);
        self
    }

    /// Direct access to the cursor attributes.
    #[inline]
    pub fn cursor(&mut self) -> &mut TextCursor {
        &mut *self.cursor
    }

    /// Lays out `s`. Returns the number of glyphs emitted.
    #[inline]
    pub fn print(&mut self, s: &str) -> usize {
        self.cursor.print(s, self.assets, self.batch)
    }
}

impl fmt::Write for TextWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.cursor.put_char(c, self.assets, self.batch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use super::*;
    use crate::test_support::assets_with_font;

    #[test]
    fn write_macro_lays_out_text() {
        let (assets, font) = assets_with_font();
        let mut cursor = TextCursor::new();
        let mut batch = CommandBatch::default();

        let mut w = TextWriter::new(&mut cursor, &mut batch, &assets);
        w.text(ColorIndex(2), font).locate(Pixel::new(1, 6));
        write!(w, "AB\n{}", 7).unwrap();

        assert_eq!(batch.len(), 3);
        assert_eq!(cursor.position, Pixel::new(1 + 3, 16));
        assert_eq!(cursor.margin, 1);
    }
}
