//! Fixtures shared by unit tests.

use crate::assets::{Assets, FontId};
use crate::atlas::IndexedImage;

/// Font sheet with one glyph per width, starting at `' '`.
///
/// Glyph pixels use index 2 (the base color); the baseline is marked on `baseline`.
pub(crate) fn sheet_with_widths(widths: &[u32], height: u32, baseline: u32) -> IndexedImage {
    let total = 1 + widths.iter().map(|w| w + 1).sum::<u32>();
    let mut img = IndexedImage::new(total, height + 1);
    img.set(0, baseline, 1);
    let mut x = 1;
    for &w in widths {
        for dx in 0..w {
            img.set(x + dx, 0, 2);
            img.set(x + dx, height, 1);
        }
        x += w + 1;
    }
    img
}

/// Assets holding one 8-pixel font (baseline 6) whose `'A'` is 6 wide and
/// `'B'` is 5 wide; every other glyph up to `'B'` is 3 wide.
pub(crate) fn assets_with_font() -> (Assets, FontId) {
    let mut widths = vec![3; 35];
    widths[('A' as u32 - 32) as usize] = 6;
    widths[('B' as u32 - 32) as usize] = 5;

    let mut assets = Assets::new();
    let id = assets
        .register_font("test", &sheet_with_widths(&widths, 8, 6))
        .unwrap();
    (assets, id)
}
