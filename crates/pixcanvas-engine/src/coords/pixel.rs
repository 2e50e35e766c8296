use std::ops::{Add, Div, Mul, Sub};

/// Integer 2D coordinate in canvas (or window) pixels.
///
/// 16-bit components match the parameter encoding consumed by the GPU.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub x: i16,
    pub y: i16,
}

impl Pixel {
    #[inline]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Converts an unsigned physical size, saturating at `i16::MAX`.
    #[inline]
    pub fn from_u32(x: u32, y: u32) -> Self {
        let clamp = |v: u32| v.min(i16::MAX as u32) as i16;
        Self::new(clamp(x), clamp(y))
    }

    /// Component-wise integer division (floor for non-negative values).
    #[inline]
    pub fn slash_cw(self, rhs: Pixel) -> Pixel {
        Pixel::new(self.x / rhs.x.max(1), self.y / rhs.y.max(1))
    }

    /// Smaller of the two components.
    #[inline]
    pub fn min_component(self) -> i16 {
        self.x.min(self.y)
    }

    /// `true` when either component is zero or negative.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.x <= 0 || self.y <= 0
    }

    #[inline]
    pub fn min(self, other: Pixel) -> Pixel {
        Pixel::new(self.x.min(other.x), self.y.min(other.y))
    }

    #[inline]
    pub fn max(self, other: Pixel) -> Pixel {
        Pixel::new(self.x.max(other.x), self.y.max(other.y))
    }
}

impl Add for Pixel {
    type Output = Pixel;
    #[inline]
    fn add(self, rhs: Pixel) -> Pixel {
        Pixel::new(self.x.wrapping_add(rhs.x), self.y.wrapping_add(rhs.y))
    }
}

impl Sub for Pixel {
    type Output = Pixel;
    #[inline]
    fn sub(self, rhs: Pixel) -> Pixel {
        Pixel::new(self.x.wrapping_sub(rhs.x), self.y.wrapping_sub(rhs.y))
    }
}

impl Mul<i16> for Pixel {
    type Output = Pixel;
    #[inline]
    fn mul(self, rhs: i16) -> Pixel {
        Pixel::new(self.x.wrapping_mul(rhs), self.y.wrapping_mul(rhs))
    }
}

/// Integer division. Rounds toward negative infinity, so window coordinates
/// left of a canvas origin map to negative canvas pixels.
impl Div<i16> for Pixel {
    type Output = Pixel;
    #[inline]
    fn div(self, rhs: i16) -> Pixel {
        let rhs = rhs.max(1);
        Pixel::new(self.x.div_euclid(rhs), self.y.div_euclid(rhs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_floors_negative_values() {
        assert_eq!(Pixel::new(-1, -3) / 2, Pixel::new(-1, -2));
        assert_eq!(Pixel::new(5, 7) / 2, Pixel::new(2, 3));
    }

    #[test]
    fn component_wise_division() {
        assert_eq!(Pixel::new(1280, 720).slash_cw(Pixel::new(640, 360)), Pixel::new(2, 2));
        assert_eq!(Pixel::new(100, 100).slash_cw(Pixel::new(640, 360)), Pixel::new(0, 0));
    }

    #[test]
    fn from_u32_saturates() {
        assert_eq!(Pixel::from_u32(70_000, 12), Pixel::new(i16::MAX, 12));
    }
}
