/// Straight-alpha sRGB color.
///
/// Invariant:
/// - components are sRGB-encoded floats in `[0, 1]`; the canvas pipeline never
///   blends, so there is no premultiplication and no linearization.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates an opaque color from sRGB bytes.
    #[inline]
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::from_srgb_u8(r, g, b, 255)
    }

    /// Parses `0xRRGGBB`.
    #[inline]
    pub fn from_hex(rgb: u32) -> Self {
        Self::opaque((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Clamps all channels to `[0, 1]`. Non-finite channels become 0.
    #[inline]
    pub fn clamped(self) -> Self {
        let c = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        Self::new(c(self.r), c(self.g), c(self.b), c(self.a))
    }

    /// Converts the color channels from sRGB to linear; alpha is unchanged.
    pub fn to_linear(self) -> Self {
        fn lin(v: f32) -> f32 {
            if v <= 0.04045 {
                v / 12.92
            } else {
                ((v + 0.055) / 1.055).powf(2.4)
            }
        }
        Self::new(lin(self.r), lin(self.g), lin(self.b), self.a)
    }

    /// GPU layout (`vec4<f32>`).
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_channels() {
        let c = Color::from_hex(0x68372b);
        assert_eq!(c, Color::opaque(0x68, 0x37, 0x2b));
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn clamped_discards_nan() {
        let c = Color::new(f32::NAN, 2.0, -1.0, 0.5).clamped();
        assert_eq!(c, Color::new(0.0, 1.0, 0.0, 0.5));
    }

    #[test]
    fn linearize_keeps_endpoints_and_darkens_midtones() {
        let c = Color::new(0.0, 1.0, 0.5, 0.25).to_linear();
        assert_eq!((c.r, c.a), (0.0, 0.25));
        assert!((c.g - 1.0).abs() < 1e-5);
        assert!((c.b - 0.214).abs() < 1e-3);
    }
}
