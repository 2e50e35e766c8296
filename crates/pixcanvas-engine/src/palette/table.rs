use super::Color;

/// Number of slots in a palette.
pub const PALETTE_SIZE: usize = 256;

/// Small integer naming a palette slot. Index 0 is reserved transparent.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorIndex(pub u8);

impl ColorIndex {
    /// The only reserved index. Always resolves to a fully transparent color.
    pub const TRANSPARENT: ColorIndex = ColorIndex(0);

    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.0 == 0
    }
}

impl From<u8> for ColorIndex {
    #[inline]
    fn from(v: u8) -> Self {
        Self(v)
    }
}

/// Indexed color table.
///
/// The table tracks whether it changed since the last GPU upload, so the
/// renderer context can upload it at most once per frame.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Color>,
    dirty: bool,
}

impl Palette {
    /// Creates a palette with every slot transparent.
    pub fn new() -> Self {
        Self {
            colors: vec![Color::transparent(); PALETTE_SIZE],
            dirty: true,
        }
    }

    /// Creates a palette from `colors`, starting at index 0.
    ///
    /// Entry 0 is overwritten with transparent; entries past
    /// [`PALETTE_SIZE`] are ignored.
    pub fn from_colors(colors: &[Color]) -> Self {
        let mut p = Self::new();
        for (slot, c) in p.colors.iter_mut().zip(colors.iter()).skip(1) {
            *slot = c.clamped();
        }
        if colors.len() > PALETTE_SIZE {
            log::debug!("palette truncated from {} to {PALETTE_SIZE} entries", colors.len());
        }
        p
    }

    /// Resolves a color index. O(1).
    #[inline]
    pub fn resolve(&self, index: ColorIndex) -> Color {
        self.colors[index.0 as usize]
    }

    /// Sets one slot. Writing index 0 is ignored.
    pub fn set(&mut self, index: ColorIndex, color: Color) {
        if index.is_transparent() {
            log::debug!("ignoring write to reserved transparent palette index");
            return;
        }
        self.colors[index.0 as usize] = color.clamped();
        self.dirty = true;
    }

    /// Replaces the whole table (see [`Palette::from_colors`]).
    pub fn replace(&mut self, colors: &[Color]) {
        *self = Self::from_colors(colors);
    }

    /// All slots, index 0 first.
    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Finds the first non-transparent slot holding exactly `color`.
    pub fn find(&self, color: Color) -> Option<ColorIndex> {
        self.colors
            .iter()
            .skip(1)
            .position(|c| *c == color)
            .map(|i| ColorIndex(i as u8 + 1))
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub(crate) fn mark_uploaded(&mut self) {
        self.dirty = false;
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_zero_is_transparent_for_any_palette() {
        let opaque: Vec<Color> = (0..PALETTE_SIZE).map(|i| Color::opaque(i as u8, 255, 255)).collect();
        for p in [Palette::new(), Palette::from_colors(&opaque), Palette::c64()] {
            assert_eq!(p.resolve(ColorIndex::TRANSPARENT).a, 0.0);
        }
    }

    #[test]
    fn writes_to_index_zero_are_ignored() {
        let mut p = Palette::new();
        p.mark_uploaded();
        p.set(ColorIndex(0), Color::opaque(255, 0, 0));
        assert!(p.resolve(ColorIndex(0)).is_transparent());
        assert!(!p.is_dirty());
    }

    #[test]
    fn set_marks_dirty_until_uploaded() {
        let mut p = Palette::new();
        p.mark_uploaded();
        p.set(ColorIndex(3), Color::opaque(1, 2, 3));
        assert!(p.is_dirty());
        assert_eq!(p.resolve(ColorIndex(3)), Color::opaque(1, 2, 3));
        p.mark_uploaded();
        assert!(!p.is_dirty());
    }

    #[test]
    fn find_skips_reserved_slot() {
        let p = Palette::from_colors(&[Color::opaque(0, 0, 0), Color::opaque(0, 0, 0)]);
        assert_eq!(p.find(Color::opaque(0, 0, 0)), Some(ColorIndex(1)));
        assert_eq!(p.find(Color::opaque(9, 9, 9)), None);
    }
}
