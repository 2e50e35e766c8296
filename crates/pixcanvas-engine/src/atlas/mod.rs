//! Texture atlases for glyph and picture bitmaps.
//!
//! Responsibilities:
//! - assign each bitmap a page ("bin") and an offset, once, at load time
//! - keep the resulting mapping table append-only so indices stay stable
//! - own the page bitmaps that get uploaded to the GPU

mod image;
mod packer;

pub use image::IndexedImage;
pub use packer::{Placement, ShelfPacker};

use bytemuck::{Pod, Zeroable};

use crate::coords::Rect;

/// Default page edge for new atlases.
pub const DEFAULT_PAGE_SIZE: u32 = 1024;

/// Errors raised while registering bitmaps.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AtlasError {
    #[error("image of {width}x{height} does not fit in a {page_width}x{page_height} atlas page")]
    TooLarge {
        width: u32,
        height: u32,
        page_width: u32,
        page_height: u32,
    },
}

/// Location of one bitmap inside an atlas.
///
/// Assigned once and never relocated.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AtlasEntry {
    pub w: i16,
    pub h: i16,
    pub bin: i16,
    pub x: i16,
    pub y: i16,
}

impl AtlasEntry {
    /// Rectangle covered within its page.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    #[inline]
    pub(crate) fn to_gpu(self) -> GpuAtlasEntry {
        GpuAtlasEntry {
            w: self.w as i32,
            h: self.h as i32,
            bin: self.bin as i32,
            x: self.x as i32,
            y: self.y as i32,
        }
    }
}

/// GPU layout of an [`AtlasEntry`] (`struct Mapping` in the shader).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct GpuAtlasEntry {
    pub w: i32,
    pub h: i32,
    pub bin: i32,
    pub x: i32,
    pub y: i32,
}

/// Fixed-size pages plus the append-only mapping table.
#[derive(Debug, Clone)]
pub struct Atlas {
    packer: ShelfPacker,
    entries: Vec<AtlasEntry>,
    pages: Vec<IndexedImage>,
    dirty: bool,
}

impl Atlas {
    pub fn new(page_width: u32, page_height: u32) -> Self {
        let page_width = page_width.min(i16::MAX as u32);
        let page_height = page_height.min(i16::MAX as u32);
        Self {
            packer: ShelfPacker::new(page_width, page_height),
            entries: Vec::new(),
            pages: Vec::new(),
            dirty: false,
        }
    }

    /// Registers `images` in order and returns the index of the first one.
    ///
    /// The batch is all-or-nothing: sizes are validated before anything is
    /// placed, so an oversized image leaves the atlas untouched.
    pub fn insert_all(&mut self, images: &[IndexedImage]) -> Result<u32, AtlasError> {
        for img in images {
            self.packer.check(img.width(), img.height())?;
        }

        let first = self.entries.len() as u32;
        let mut placed = Vec::with_capacity(images.len());
        for img in images {
            let at = self.packer.place(img.width(), img.height())?;
            self.entries.push(AtlasEntry {
                w: img.width() as i16,
                h: img.height() as i16,
                bin: at.page as i16,
                x: at.x as i16,
                y: at.y as i16,
            });
            placed.push(at);
        }

        let (pw, ph) = self.packer.page_size();
        while (self.pages.len() as u32) < self.packer.page_count() {
            self.pages.push(IndexedImage::new(pw, ph));
        }

        for (img, at) in images.iter().zip(placed) {
            self.pages[at.page as usize].blit(img, at.x, at.y);
        }

        if !images.is_empty() {
            self.dirty = true;
        }
        Ok(first)
    }

    /// Registers a single image and returns its index.
    pub fn insert(&mut self, image: &IndexedImage) -> Result<u32, AtlasError> {
        self.insert_all(std::slice::from_ref(image))
    }

    #[inline]
    pub fn entry(&self, index: u32) -> Option<&AtlasEntry> {
        self.entries.get(index as usize)
    }

    #[inline]
    pub fn entries(&self) -> &[AtlasEntry] {
        &self.entries
    }

    #[inline]
    pub fn pages(&self) -> &[IndexedImage] {
        &self.pages
    }

    #[inline]
    pub fn page_size(&self) -> (u32, u32) {
        self.packer.page_size()
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

impl Default for Atlas {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, index: u8) -> IndexedImage {
        IndexedImage::from_pixels(w, h, vec![index; (w * h) as usize]).unwrap()
    }

    #[test]
    fn entries_follow_packing_order() {
        let mut atlas = Atlas::new(10, 8);
        let first = atlas
            .insert_all(&[solid(3, 8, 1), solid(5, 8, 2), solid(2, 8, 3)])
            .unwrap();
        assert_eq!(first, 0);
        let xs: Vec<i16> = atlas.entries().iter().map(|e| e.x).collect();
        assert_eq!(xs, vec![0, 3, 8]);

        let next = atlas.insert(&solid(5, 8, 4)).unwrap();
        assert_eq!(next, 3);
        assert_eq!(atlas.entry(3).map(|e| (e.bin, e.x)), Some((1, 0)));
        assert_eq!(atlas.pages().len(), 2);
    }

    #[test]
    fn pixels_are_copied_into_pages() {
        let mut atlas = Atlas::new(10, 8);
        atlas.insert_all(&[solid(3, 8, 1), solid(5, 8, 2), solid(2, 8, 3)]).unwrap();
        let page = &atlas.pages()[0];
        assert_eq!(page.get(0, 0), 1);
        assert_eq!(page.get(3, 7), 2);
        assert_eq!(page.get(9, 4), 3);
    }

    #[test]
    fn rectangles_never_overlap_and_stay_in_page() {
        let mut atlas = Atlas::new(16, 16);
        let imgs: Vec<IndexedImage> = (1..40u32)
            .map(|i| solid(1 + i % 7, 1 + (i * 3) % 9, i as u8))
            .collect();
        atlas.insert_all(&imgs).unwrap();

        let page = Rect::new(0, 0, 16, 16);
        let entries = atlas.entries();
        for (i, a) in entries.iter().enumerate() {
            assert!(page.contains_rect(a.rect()), "entry {i} leaves its page");
            for b in &entries[i + 1..] {
                if a.bin == b.bin {
                    assert!(a.rect().intersect(b.rect()).is_none(), "{a:?} overlaps {b:?}");
                }
            }
        }
    }

    #[test]
    fn failed_batch_leaves_atlas_untouched() {
        let mut atlas = Atlas::new(10, 8);
        atlas.insert(&solid(4, 4, 1)).unwrap();
        atlas.mark_uploaded();

        let err = atlas.insert_all(&[solid(2, 2, 1), solid(11, 2, 1)]).unwrap_err();
        assert!(matches!(err, AtlasError::TooLarge { width: 11, .. }));
        assert_eq!(atlas.entries().len(), 1);
        assert!(!atlas.is_dirty());

        // Packing resumes where it left off.
        assert_eq!(atlas.insert(&solid(2, 2, 1)).unwrap(), 1);
        assert_eq!(atlas.entry(1).map(|e| e.x), Some(4));
    }

    #[test]
    fn earlier_entries_are_stable() {
        let mut atlas = Atlas::new(8, 8);
        atlas.insert(&solid(3, 3, 1)).unwrap();
        let before = *atlas.entry(0).unwrap();
        for _ in 0..20 {
            atlas.insert(&solid(5, 5, 2)).unwrap();
        }
        assert_eq!(*atlas.entry(0).unwrap(), before);
    }
}
