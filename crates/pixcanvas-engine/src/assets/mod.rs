//! Font and picture registration.
//!
//! Assets are indexed-palette bitmaps. Registering one packs its bitmaps into
//! the glyph or picture [`Atlas`] and hands back a stable handle. A failed
//! registration leaves every previously registered asset untouched.

mod decode;
mod font;

pub use decode::{decode_indexed_png, DecodedImage};
pub use font::{slice_font_sheet, Font, FontId, FontSheet, FIRST_CHAR};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::atlas::{Atlas, AtlasEntry, AtlasError, IndexedImage};
use crate::coords::Pixel;

/// Errors raised while loading or registering an asset.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("decoding image: {0}")]
    Decode(#[from] png::DecodingError),
    #[error("color model not supported ({0:?}); expected an indexed image")]
    NotIndexed(png::ColorType),
    #[error("malformed asset: {0}")]
    Malformed(&'static str),
    #[error("while opening \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Atlas(#[from] AtlasError),
    #[error("an asset named \"{0}\" is already registered")]
    DuplicateName(String),
    #[error("too many fonts registered")]
    TooManyFonts,
}

/// Handle to a registered picture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PictureId(pub(crate) u32);

impl PictureId {
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// What to load in [`Assets::load_all`].
#[derive(Debug, Clone)]
pub enum AssetRequest {
    Font { name: String, path: PathBuf },
    Picture { name: String, path: PathBuf },
}

/// Outcome of [`Assets::load_all`].
#[derive(Debug, Default)]
pub struct LoadReport {
    pub fonts: Vec<(String, FontId)>,
    pub pictures: Vec<(String, PictureId)>,
    pub failed: Vec<(String, AssetError)>,
}

/// Registry of fonts and pictures plus their atlases.
#[derive(Debug, Default)]
pub struct Assets {
    glyphs: Atlas,
    pictures: Atlas,
    fonts: Vec<Font>,
    font_names: HashMap<String, FontId>,
    picture_names: HashMap<String, PictureId>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `page_width × page_height` pages for both atlases.
    pub fn with_page_size(page_width: u32, page_height: u32) -> Self {
        Self {
            glyphs: Atlas::new(page_width, page_height),
            pictures: Atlas::new(page_width, page_height),
            ..Self::default()
        }
    }

    // ── registration ──────────────────────────────────────────────────────

    /// Slices `sheet` into glyphs and packs them into the glyph atlas.
    pub fn register_font(&mut self, name: &str, sheet: &IndexedImage) -> Result<FontId, AssetError> {
        self.check_name(name)?;
        if self.fonts.len() >= u16::MAX as usize {
            return Err(AssetError::TooManyFonts);
        }

        let sliced = slice_font_sheet(sheet)?;
        let first_glyph = self.glyphs.insert_all(&sliced.glyphs)?;

        let id = FontId(self.fonts.len() as u16);
        self.fonts.push(Font {
            name: name.to_string(),
            height: sliced.height,
            baseline: sliced.baseline,
            base_color: sliced.base_color,
            first_glyph,
            glyph_count: sliced.glyphs.len() as u32,
        });
        self.font_names.insert(name.to_string(), id);
        log::debug!("registered font \"{name}\" ({} glyphs)", sliced.glyphs.len());
        Ok(id)
    }

    /// Packs `image` into the picture atlas.
    pub fn register_picture(&mut self, name: &str, image: &IndexedImage) -> Result<PictureId, AssetError> {
        self.check_name(name)?;
        let id = PictureId(self.pictures.insert(image)?);
        self.picture_names.insert(name.to_string(), id);
        log::debug!("registered picture \"{name}\" ({}x{})", image.width(), image.height());
        Ok(id)
    }

    pub fn load_font_png(&mut self, name: &str, bytes: &[u8]) -> Result<FontId, AssetError> {
        let decoded = decode_indexed_png(bytes)?;
        self.register_font(name, &decoded.image)
    }

    pub fn load_picture_png(&mut self, name: &str, bytes: &[u8]) -> Result<PictureId, AssetError> {
        let decoded = decode_indexed_png(bytes)?;
        self.register_picture(name, &decoded.image)
    }

    pub fn load_font_file(&mut self, name: &str, path: &Path) -> Result<FontId, AssetError> {
        let bytes = read(path)?;
        self.load_font_png(name, &bytes)
    }

    pub fn load_picture_file(&mut self, name: &str, path: &Path) -> Result<PictureId, AssetError> {
        let bytes = read(path)?;
        self.load_picture_png(name, &bytes)
    }

    /// Loads every request; failures are logged and skipped.
    pub fn load_all(&mut self, requests: &[AssetRequest]) -> LoadReport {
        let mut report = LoadReport::default();
        for req in requests {
            let (name, result) = match req {
                AssetRequest::Font { name, path } => {
                    (name, self.load_font_file(name, path).map(|id| report.fonts.push((name.clone(), id))))
                }
                AssetRequest::Picture { name, path } => {
                    (name, self.load_picture_file(name, path).map(|id| report.pictures.push((name.clone(), id))))
                }
            };
            if let Err(e) = result {
                log::warn!("skipping asset \"{name}\": {e}");
                report.failed.push((name.clone(), e));
            }
        }
        report
    }

    fn check_name(&self, name: &str) -> Result<(), AssetError> {
        if self.font_names.contains_key(name) || self.picture_names.contains_key(name) {
            return Err(AssetError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    // ── lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn font(&self, id: FontId) -> Option<&Font> {
        self.fonts.get(id.0 as usize)
    }

    pub fn font_by_name(&self, name: &str) -> Option<FontId> {
        self.font_names.get(name).copied()
    }

    pub fn picture_by_name(&self, name: &str) -> Option<PictureId> {
        self.picture_names.get(name).copied()
    }

    /// Size of a registered picture in canvas pixels.
    pub fn picture_size(&self, id: PictureId) -> Option<Pixel> {
        self.pictures.entry(id.0).map(|e| e.rect().size)
    }

    /// Atlas placement of a glyph index (see [`Font::glyph`]).
    #[inline]
    pub fn glyph(&self, index: u32) -> Option<&AtlasEntry> {
        self.glyphs.entry(index)
    }

    #[inline]
    pub fn glyph_atlas(&self) -> &Atlas {
        &self.glyphs
    }

    #[inline]
    pub fn picture_atlas(&self) -> &Atlas {
        &self.pictures
    }

    pub(crate) fn atlases_mut(&mut self) -> (&mut Atlas, &mut Atlas) {
        (&mut self.glyphs, &mut self.pictures)
    }
}

fn read(path: &Path) -> Result<Vec<u8>, AssetError> {
    std::fs::read(path).map_err(|source| AssetError::Io { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font_sheet() -> IndexedImage {
        // Three glyphs of widths 1, 2, 1; glyph height 2; marker row last.
        #[rustfmt::skip]
        let px = vec![
            0, 2, 0, 2, 2, 0, 2,
            1, 2, 0, 2, 0, 0, 2,
            0, 1, 0, 1, 1, 0, 1,
        ];
        IndexedImage::from_pixels(7, 3, px).unwrap()
    }

    #[test]
    fn font_glyphs_get_consecutive_stable_indices() {
        let mut assets = Assets::new();
        let pic = assets.register_picture("pic", &IndexedImage::new(4, 4)).unwrap();
        let a = assets.register_font("a", &font_sheet()).unwrap();
        let b = assets.register_font("b", &font_sheet()).unwrap();

        let fa = assets.font(a).unwrap();
        let fb = assets.font(b).unwrap();
        assert_eq!(fa.glyph(' '), 0);
        assert_eq!(fb.glyph(' '), 3);
        assert_eq!(assets.glyph(fb.glyph('!')).map(|e| e.w), Some(2));
        assert_eq!((fa.height, fa.baseline, fa.base_color), (2, 1, 2));
        assert_eq!(assets.picture_size(pic), Some(Pixel::new(4, 4)));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut assets = Assets::new();
        assets.register_font("x", &font_sheet()).unwrap();
        let err = assets.register_picture("x", &IndexedImage::new(1, 1)).unwrap_err();
        assert!(matches!(err, AssetError::DuplicateName(n) if n == "x"));
        assert!(assets.picture_by_name("x").is_none());
    }

    #[test]
    fn oversized_picture_fails_without_corrupting_others() {
        let mut assets = Assets::with_page_size(8, 8);
        let ok = assets.register_picture("ok", &IndexedImage::new(4, 4)).unwrap();
        let err = assets.register_picture("big", &IndexedImage::new(9, 1)).unwrap_err();
        assert!(matches!(err, AssetError::Atlas(AtlasError::TooLarge { .. })));
        assert_eq!(assets.picture_atlas().entries().len(), 1);
        assert_eq!(assets.picture_by_name("ok"), Some(ok));
        assert!(assets.picture_by_name("big").is_none());
    }

    #[test]
    fn load_all_skips_failures() {
        let mut assets = Assets::new();
        let report = assets.load_all(&[
            AssetRequest::Font { name: "missing".into(), path: "/nonexistent/font.png".into() },
            AssetRequest::Picture { name: "also-missing".into(), path: "/nonexistent/pic.png".into() },
        ]);
        assert!(report.fonts.is_empty());
        assert_eq!(report.failed.len(), 2);
        assert!(matches!(report.failed[0].1, AssetError::Io { .. }));
    }
}
