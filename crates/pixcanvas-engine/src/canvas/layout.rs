use crate::coords::Pixel;

use super::Zoom;

/// Resolved placement of a canvas inside the window.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Layout {
    /// Window pixels per canvas pixel (at least 1).
    pub pixel: i16,
    /// Canvas size in canvas pixels.
    pub size: Pixel,
    /// Top-left corner of the canvas in window pixels.
    pub origin: Pixel,
}

impl Layout {
    /// Layout used before the window size is known.
    pub fn initial(target: Pixel, zoom: Zoom) -> Self {
        let pixel = match zoom {
            Zoom::Fixed(n) => n.max(1),
            Zoom::Auto => 1,
        };
        Self { pixel, size: target, origin: Pixel::zero() }
    }

    /// Fits a canvas into `window`.
    ///
    /// Autozoom picks `p = max(1, min(W.x / T.x, W.y / T.y))`; both policies
    /// then extend the canvas to `S = W / p` and center it at
    /// `O = (W - S * p) / 2`, rounded down.
    ///
    /// Returns `None` for a zero-area window (e.g. minimized).
    pub fn resolve(window: Pixel, target: Pixel, zoom: Zoom) -> Option<Self> {
        if window.is_empty() {
            return None;
        }

        let pixel = match zoom {
            Zoom::Fixed(n) => n.max(1),
            Zoom::Auto => window.slash_cw(target).min_component().max(1),
        };

        let size = window / pixel;
        let origin = (window - size * pixel) / 2;
        Some(Self { pixel, size, origin })
    }

    /// Maps a window position to canvas pixels.
    #[inline]
    pub fn window_to_canvas(&self, p: Pixel) -> Pixel {
        (p - self.origin) / self.pixel
    }

    /// Size of the canvas in window pixels.
    #[inline]
    pub fn window_extent(&self) -> Pixel {
        self.size * self.pixel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auto(w: (i16, i16), t: (i16, i16)) -> Layout {
        Layout::resolve(Pixel::new(w.0, w.1), Pixel::new(t.0, t.1), Zoom::Auto).unwrap()
    }

    #[test]
    fn autozoom_exact_double() {
        let l = auto((1280, 720), (640, 360));
        assert_eq!((l.pixel, l.size, l.origin), (2, Pixel::new(640, 360), Pixel::zero()));
    }

    #[test]
    fn autozoom_extends_canvas_to_window() {
        let l = auto((1000, 700), (640, 360));
        assert_eq!((l.pixel, l.size, l.origin), (1, Pixel::new(1000, 700), Pixel::zero()));
    }

    #[test]
    fn autozoom_never_below_one() {
        let l = auto((100, 100), (640, 360));
        assert_eq!(l.pixel, 1);
        assert_eq!(l.size, Pixel::new(100, 100));
    }

    #[test]
    fn odd_remainder_rounds_origin_down() {
        // Leftover of 3x2 window pixels.
        let l = auto((1283, 722), (320, 180));
        assert_eq!(l.pixel, 4);
        assert_eq!(l.size, Pixel::new(320, 180));
        assert_eq!(l.origin, Pixel::new(1, 1));

        let l = auto((1281, 721), (320, 180));
        assert_eq!(l.pixel, 4);
        assert_eq!(l.size, Pixel::new(320, 180));
        assert_eq!(l.origin, Pixel::new(0, 0));
    }

    #[test]
    fn fixed_zoom_covers_window() {
        let l = Layout::resolve(Pixel::new(805, 600), Pixel::new(640, 360), Zoom::Fixed(2)).unwrap();
        assert_eq!((l.pixel, l.size, l.origin), (2, Pixel::new(402, 300), Pixel::new(0, 0)));

        let l = Layout::resolve(Pixel::new(800, 600), Pixel::new(640, 360), Zoom::Fixed(0)).unwrap();
        assert_eq!(l.pixel, 1);
    }

    #[test]
    fn zero_area_window_has_no_layout() {
        assert!(Layout::resolve(Pixel::new(0, 600), Pixel::new(640, 360), Zoom::Auto).is_none());
    }

    #[test]
    fn window_positions_map_through_origin_and_zoom() {
        let l = Layout { pixel: 3, size: Pixel::new(100, 100), origin: Pixel::new(2, 1) };
        assert_eq!(l.window_to_canvas(Pixel::new(2, 1)), Pixel::zero());
        assert_eq!(l.window_to_canvas(Pixel::new(10, 7)), Pixel::new(2, 2));
        assert_eq!(l.window_to_canvas(Pixel::new(0, 0)), Pixel::new(-1, -1));
    }
}
