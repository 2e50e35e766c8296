use crate::atlas::IndexedImage;

use super::AssetError;

/// First character of every font sheet; glyph `g` renders `FIRST_CHAR + g`.
pub const FIRST_CHAR: char = ' ';

/// Handle to a registered font.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) u16);

/// Metrics of a registered font. Glyph bitmaps live in the glyph atlas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub name: String,
    /// Glyph height in pixels (sheet height minus the marker row).
    pub height: i16,
    /// Row of the baseline, measured from the glyph top.
    pub baseline: i16,
    /// Smallest color index used by the glyphs; text colors are relative to it.
    pub base_color: u8,
    pub(crate) first_glyph: u32,
    pub(crate) glyph_count: u32,
}

impl Font {
    /// Glyph atlas index used to render `ch`.
    ///
    /// Characters outside the sheet fall back to `'?'`, then to the first glyph.
    pub fn glyph(&self, ch: char) -> u32 {
        self.local_glyph(ch)
            .or_else(|| self.local_glyph('?'))
            .map_or(self.first_glyph, |g| self.first_glyph + g)
    }

    #[inline]
    pub fn glyph_count(&self) -> u32 {
        self.glyph_count
    }

    /// Interline used when a text cursor does not set one.
    #[inline]
    pub fn default_interline(&self) -> i16 {
        (self.height as f32 * 1.25) as i16
    }

    fn local_glyph(&self, ch: char) -> Option<u32> {
        let offset = (ch as u32).checked_sub(FIRST_CHAR as u32)?;
        (offset < self.glyph_count).then_some(offset)
    }
}

/// Glyph bitmaps and metrics cut out of a font sheet.
#[derive(Debug, Clone)]
pub struct FontSheet {
    pub glyphs: Vec<IndexedImage>,
    pub height: i16,
    pub baseline: i16,
    pub base_color: u8,
}

/// Cuts a font sheet into glyphs.
///
/// Sheet layout:
/// - the last row is a marker row: non-zero runs mark glyph columns, zero runs
///   separate glyphs
/// - column 0 is reserved; its first non-zero pixel marks the baseline row
/// - glyph scanning starts at column 1, and every glyph starts where the
///   previous separator run ends; a separator at column 1 therefore yields a
///   zero-width glyph for `' '`
pub fn slice_font_sheet(sheet: &IndexedImage) -> Result<FontSheet, AssetError> {
    if sheet.height() < 2 || sheet.width() < 2 {
        return Err(AssetError::Malformed("font sheet is smaller than 2x2"));
    }
    let h = sheet.height() - 1;

    let baseline = (0..h).find(|&y| sheet.get(0, y) != 0).unwrap_or(h);

    let mut glyphs = Vec::new();
    let mut x = 1;
    while x < sheet.width() {
        let start = x;
        while x < sheet.width() && sheet.get(x, h) != 0 {
            x += 1;
        }
        glyphs.push(sheet.sub_image(start, 0, x - start, h));
        while x < sheet.width() && sheet.get(x, h) == 0 {
            x += 1;
        }
    }

    if glyphs.iter().all(|g| g.width() == 0) {
        return Err(AssetError::Malformed("font sheet has no glyph markers"));
    }

    let base_color = glyphs
        .iter()
        .flat_map(|g| g.pixels().iter().copied())
        .filter(|&p| p != 0)
        .min()
        .unwrap_or(1);

    Ok(FontSheet {
        glyphs,
        height: h as i16,
        baseline: baseline as i16,
        base_color,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a sheet from ASCII art: '.' = 0, digits = index; last line is the marker row.
    fn sheet(rows: &[&str]) -> IndexedImage {
        let w = rows[0].len() as u32;
        let px = rows
            .iter()
            .flat_map(|r| r.bytes())
            .map(|b| if b == b'.' { 0 } else { b - b'0' })
            .collect();
        IndexedImage::from_pixels(w, rows.len() as u32, px).unwrap()
    }

    #[test]
    fn slices_glyphs_between_separators() {
        let s = sheet(&[
            ".33.3..3",
            ".3..3.33",
            "2333.3.3",
            ".11.1.11",
        ]);
        let out = slice_font_sheet(&s).unwrap();
        let widths: Vec<u32> = out.glyphs.iter().map(|g| g.width()).collect();
        assert_eq!(widths, vec![2, 1, 2]);
        assert_eq!(out.height, 3);
        assert_eq!(out.baseline, 2);
        assert_eq!(out.base_color, 3);
        assert_eq!(out.glyphs[0].pixels(), &[3, 3, 3, 0, 3, 3]);
    }

    #[test]
    fn leading_separator_gives_zero_width_first_glyph() {
        let s = sheet(&[
            "1.2.2",
            "..1.1",
        ]);
        let out = slice_font_sheet(&s).unwrap();
        let widths: Vec<u32> = out.glyphs.iter().map(|g| g.width()).collect();
        assert_eq!(widths, vec![0, 1, 1]);
        assert_eq!(out.base_color, 2);

        let mut atlas = crate::atlas::Atlas::new(8, 8);
        let first = atlas.insert_all(&out.glyphs).unwrap();
        assert_eq!(atlas.entry(first).map(|e| e.w), Some(0));
        assert_eq!(atlas.entry(first + 1).map(|e| e.w), Some(1));
    }

    #[test]
    fn sheet_without_markers_is_malformed() {
        let s = sheet(&[".11", "..."]);
        assert!(matches!(slice_font_sheet(&s), Err(AssetError::Malformed(_))));
    }

    #[test]
    fn glyph_lookup_falls_back_to_question_mark() {
        let font = Font {
            name: "t".into(),
            height: 8,
            baseline: 6,
            base_color: 1,
            first_glyph: 10,
            glyph_count: 95,
        };
        assert_eq!(font.glyph(' '), 10);
        assert_eq!(font.glyph('A'), 10 + 33);
        assert_eq!(font.glyph('é'), 10 + ('?' as u32 - 32));
        assert_eq!(font.default_interline(), 10);

        let tiny = Font { glyph_count: 2, ..font };
        assert_eq!(tiny.glyph('\u{7f}'), 10);
    }
}
