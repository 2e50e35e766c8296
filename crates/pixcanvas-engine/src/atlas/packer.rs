use super::AtlasError;

/// Position assigned by [`ShelfPacker::place`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Placement {
    pub page: u32,
    pub x: u32,
    pub y: u32,
}

/// Deterministic shelf packer over fixed-size pages.
///
/// Rectangles are placed left-to-right on horizontal shelves in submission
/// order; no sorting happens, so identical load sequences give identical
/// layouts. A shelf takes the height of its first item.
#[derive(Debug, Clone)]
pub struct ShelfPacker {
    page_width: u32,
    page_height: u32,

    page: u32,
    shelf_y: u32,
    shelf_height: u32,
    cursor_x: u32,
    used: bool,
}

impl ShelfPacker {
    pub fn new(page_width: u32, page_height: u32) -> Self {
        Self {
            page_width,
            page_height,
            page: 0,
            shelf_y: 0,
            shelf_height: 0,
            cursor_x: 0,
            used: false,
        }
    }

    #[inline]
    pub fn page_size(&self) -> (u32, u32) {
        (self.page_width, self.page_height)
    }

    /// Number of pages touched so far.
    #[inline]
    pub fn page_count(&self) -> u32 {
        if self.used { self.page + 1 } else { 0 }
    }

    /// Checks a size against the page without placing it.
    pub fn check(&self, w: u32, h: u32) -> Result<(), AtlasError> {
        if w > self.page_width || h > self.page_height {
            return Err(AtlasError::TooLarge {
                width: w,
                height: h,
                page_width: self.page_width,
                page_height: self.page_height,
            });
        }
        Ok(())
    }

    /// Assigns a position to a `w × h` rectangle.
    pub fn place(&mut self, w: u32, h: u32) -> Result<Placement, AtlasError> {
        self.check(w, h)?;
        self.used = true;

        if w == 0 || h == 0 {
            return Ok(self.here());
        }

        let fresh_shelf = self.cursor_x == 0 && self.shelf_height == 0;
        if fresh_shelf {
            self.shelf_height = h;
        } else if self.cursor_x + w > self.page_width || h > self.shelf_height {
            let shelf_bottom = self.shelf_y + self.shelf_height;
            if shelf_bottom + h <= self.page_height {
                self.shelf_y = shelf_bottom;
            } else {
                self.page += 1;
                self.shelf_y = 0;
                log::debug!("atlas: opening page {}", self.page);
            }
            self.shelf_height = h;
            self.cursor_x = 0;
        }

        let at = self.here();
        self.cursor_x += w;
        Ok(at)
    }

    #[inline]
    fn here(&self) -> Placement {
        Placement { page: self.page, x: self.cursor_x, y: self.shelf_y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xs(p: &mut ShelfPacker, widths: &[u32], h: u32) -> Vec<Placement> {
        widths.iter().map(|&w| p.place(w, h).unwrap()).collect()
    }

    #[test]
    fn fills_shelf_then_opens_page() {
        let mut p = ShelfPacker::new(10, 8);
        let placed = xs(&mut p, &[3, 5, 2], 8);
        assert_eq!(placed.iter().map(|pl| pl.x).collect::<Vec<_>>(), vec![0, 3, 8]);
        assert!(placed.iter().all(|pl| pl.page == 0 && pl.y == 0));

        let next = p.place(5, 8).unwrap();
        assert_eq!(next, Placement { page: 1, x: 0, y: 0 });
        assert_eq!(p.page_count(), 2);
    }

    #[test]
    fn opens_shelf_below_when_page_is_tall_enough() {
        let mut p = ShelfPacker::new(10, 16);
        xs(&mut p, &[3, 5, 2], 8);
        assert_eq!(p.place(5, 8).unwrap(), Placement { page: 0, x: 0, y: 8 });
    }

    #[test]
    fn taller_item_starts_new_shelf() {
        let mut p = ShelfPacker::new(32, 32);
        p.place(4, 4).unwrap();
        assert_eq!(p.place(4, 6).unwrap(), Placement { page: 0, x: 0, y: 4 });
        // Shorter items fit on the taller shelf.
        assert_eq!(p.place(4, 2).unwrap(), Placement { page: 0, x: 4, y: 4 });
    }

    #[test]
    fn too_large_is_rejected_without_side_effects() {
        let mut p = ShelfPacker::new(10, 8);
        assert!(matches!(p.place(11, 1), Err(AtlasError::TooLarge { .. })));
        assert!(matches!(p.place(1, 9), Err(AtlasError::TooLarge { .. })));
        assert_eq!(p.page_count(), 0);
        assert_eq!(p.place(10, 8).unwrap(), Placement { page: 0, x: 0, y: 0 });
    }

    #[test]
    fn zero_area_items_take_no_space() {
        let mut p = ShelfPacker::new(10, 8);
        p.place(0, 8).unwrap();
        assert_eq!(p.place(10, 8).unwrap(), Placement { page: 0, x: 0, y: 0 });
    }

    #[test]
    fn same_sequence_same_layout() {
        let sizes = [(3, 5), (7, 2), (4, 4), (9, 1), (2, 8), (5, 5)];
        let run = || {
            let mut p = ShelfPacker::new(12, 10);
            sizes.iter().map(|&(w, h)| p.place(w, h).unwrap()).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
