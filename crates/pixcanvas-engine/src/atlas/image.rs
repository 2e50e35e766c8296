/// Row-major bitmap of palette indices (stride = width).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl IndexedImage {
    /// Creates a fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height) as usize],
        }
    }

    /// Wraps existing pixels. Returns `None` if the length does not match.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == (width * height) as usize).then_some(Self { width, height, pixels })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Index at `(x, y)`; out-of-bounds reads are transparent.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.pixels[(x + y * self.width) as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, index: u8) {
        if x < self.width && y < self.height {
            self.pixels[(x + y * self.width) as usize] = index;
        }
    }

    /// Copies the `w × h` region at `(x, y)`, clipped to the image.
    pub fn sub_image(&self, x: u32, y: u32, w: u32, h: u32) -> IndexedImage {
        let w = w.min(self.width.saturating_sub(x));
        let h = h.min(self.height.saturating_sub(y));
        let mut out = IndexedImage::new(w, h);
        for row in 0..h {
            let src = ((y + row) * self.width + x) as usize;
            let dst = (row * w) as usize;
            out.pixels[dst..dst + w as usize].copy_from_slice(&self.pixels[src..src + w as usize]);
        }
        out
    }

    /// Copies `src` into `self` with its top-left at `(dx, dy)`, clipped.
    pub fn blit(&mut self, src: &IndexedImage, dx: u32, dy: u32) {
        let w = src.width.min(self.width.saturating_sub(dx));
        let h = src.height.min(self.height.saturating_sub(dy));
        for row in 0..h {
            let s = (row * src.width) as usize;
            let d = ((dy + row) * self.width + dx) as usize;
            self.pixels[d..d + w as usize].copy_from_slice(&src.pixels[s..s + w as usize]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: u32, h: u32) -> IndexedImage {
        let px = (0..w * h).map(|i| i as u8).collect();
        IndexedImage::from_pixels(w, h, px).unwrap()
    }

    #[test]
    fn from_pixels_rejects_wrong_length() {
        assert!(IndexedImage::from_pixels(2, 2, vec![0; 3]).is_none());
    }

    #[test]
    fn sub_image_copies_region() {
        let img = ramp(4, 3);
        let sub = img.sub_image(1, 1, 2, 2);
        assert_eq!(sub.pixels(), &[5, 6, 9, 10]);
    }

    #[test]
    fn blit_is_clipped_to_destination() {
        let mut dst = IndexedImage::new(3, 2);
        dst.blit(&ramp(2, 2), 2, 1);
        assert_eq!(dst.pixels(), &[0, 0, 0, 0, 0, 0]);
        assert_eq!(dst.get(2, 1), 0);

        let mut dst = IndexedImage::new(3, 3);
        dst.blit(&ramp(2, 2), 1, 1);
        assert_eq!(dst.get(1, 1), 0);
        assert_eq!(dst.get(2, 1), 1);
        assert_eq!(dst.get(1, 2), 2);
        assert_eq!(dst.get(2, 2), 3);
    }
}
