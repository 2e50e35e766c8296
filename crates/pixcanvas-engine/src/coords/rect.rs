use super::Pixel;

/// Axis-aligned integer rectangle (top-left origin, half-open extent).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub origin: Pixel,
    pub size: Pixel,
}

impl Rect {
    #[inline]
    pub const fn new(x: i16, y: i16, w: i16, h: i16) -> Self {
        Self {
            origin: Pixel::new(x, y),
            size: Pixel::new(w, h),
        }
    }

    /// Exclusive bottom-right corner.
    #[inline]
    pub fn max(self) -> Pixel {
        self.origin + self.size
    }

    /// `true` when `other` lies entirely inside `self`.
    #[inline]
    pub fn contains_rect(self, other: Rect) -> bool {
        let (a, b) = (self.max(), other.max());
        other.origin.x >= self.origin.x
            && other.origin.y >= self.origin.y
            && b.x <= a.x
            && b.y <= a.y
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let x0 = self.origin.x.max(other.origin.x);
        let y0 = self.origin.y.max(other.origin.y);
        let x1 = self.max().x.min(other.max().x);
        let y1 = self.max().y.min(other.max().y);

        if x1 <= x0 || y1 <= y0 {
            None
        } else {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: i16, y: i16, w: i16, h: i16) -> Rect { Rect::new(x, y, w, h) }

    #[test]
    fn contains_rect_edges() {
        let page = r(0, 0, 10, 8);
        assert!(page.contains_rect(r(8, 0, 2, 8)));
        assert!(!page.contains_rect(r(8, 0, 3, 8)));
    }

    #[test]
    fn intersect_overlapping() {
        assert_eq!(r(0, 0, 10, 10).intersect(r(5, 5, 10, 10)), Some(r(5, 5, 5, 5)));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        assert!(r(0, 0, 3, 8).intersect(r(3, 0, 5, 8)).is_none());
    }
}
