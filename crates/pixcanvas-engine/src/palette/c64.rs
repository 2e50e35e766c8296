//! Palette of the C64 microcomputer.

use super::{Color, ColorIndex, Palette};

pub const BLACK: ColorIndex = ColorIndex(1);
pub const WHITE: ColorIndex = ColorIndex(2);
pub const RED: ColorIndex = ColorIndex(3);
pub const CYAN: ColorIndex = ColorIndex(4);
pub const VIOLET: ColorIndex = ColorIndex(5);
pub const GREEN: ColorIndex = ColorIndex(6);
pub const BLUE: ColorIndex = ColorIndex(7);
pub const YELLOW: ColorIndex = ColorIndex(8);
pub const ORANGE: ColorIndex = ColorIndex(9);
pub const BROWN: ColorIndex = ColorIndex(10);
pub const LIGHT_RED: ColorIndex = ColorIndex(11);
pub const DARK_GREY: ColorIndex = ColorIndex(12);
pub const GREY: ColorIndex = ColorIndex(13);
pub const LIGHT_GREEN: ColorIndex = ColorIndex(14);
pub const LIGHT_BLUE: ColorIndex = ColorIndex(15);
pub const LIGHT_GREY: ColorIndex = ColorIndex(16);

const RGB: [u32; 16] = [
    0x000000, 0xffffff, 0x68372b, 0x70a4b2, 0x6f3d86, 0x588d43, 0x352879, 0xb8c76f,
    0x6f4f25, 0x433900, 0x9a6759, 0x444444, 0x6c6c6c, 0x9ad284, 0x6c5eb5, 0x959595,
];

impl Palette {
    /// The 16 C64 colors at indices 1..=16.
    pub fn c64() -> Self {
        let mut colors = vec![Color::transparent()];
        colors.extend(RGB.iter().map(|&c| Color::from_hex(c)));
        Palette::from_colors(&colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_indices_match_table() {
        let p = Palette::c64();
        assert_eq!(p.resolve(BLACK), Color::opaque(0, 0, 0));
        assert_eq!(p.resolve(WHITE), Color::opaque(255, 255, 255));
        assert_eq!(p.resolve(LIGHT_GREY), Color::from_hex(0x959595));
        assert!(p.resolve(ColorIndex(17)).is_transparent());
    }
}
