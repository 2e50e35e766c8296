//! Renderer context: owns every canvas plus the state they share.
//!
//! Responsibilities:
//! - create, look up and destroy canvases through generational handles
//! - own the palette and the asset registry (atlases)
//! - upload shared tables at most once per frame, before the paint that needs them
//! - defer window resizes and zoom changes to the next frame boundary

use anyhow::Context;

use crate::assets::Assets;
use crate::canvas::{Canvas, CanvasConfig, CanvasId, CanvasRegistry, SetupError, Zoom};
use crate::coords::Pixel;
use crate::gpu::{AtlasKind, GpuFacade};
use crate::palette::Palette;
use crate::text::TextWriter;

/// Which shared tables went up to the GPU during the current frame.
#[derive(Debug, Default, Copy, Clone)]
struct SharedUploads {
    palette: bool,
    glyphs: bool,
    pictures: bool,
}

/// Owns canvases, palette and assets.
///
/// Frame protocol:
/// 1. [`begin_frame`](Self::begin_frame) applies pending resizes, zooms and resolutions
/// 2. shape and text calls on canvases
/// 3. [`paint`](Self::paint) / [`display`](Self::display) per canvas
#[derive(Debug)]
pub struct PixelContext {
    canvases: CanvasRegistry,
    palette: Palette,
    assets: Assets,

    window_size: Pixel,
    pending_resize: Option<Pixel>,
    frame: u64,
    uploads: SharedUploads,
}

impl PixelContext {
    pub fn new() -> Self {
        Self::with_palette(Palette::new())
    }

    pub fn with_palette(palette: Palette) -> Self {
        Self {
            canvases: CanvasRegistry::new(),
            palette,
            assets: Assets::new(),
            window_size: Pixel::zero(),
            pending_resize: None,
            frame: 0,
            uploads: SharedUploads::default(),
        }
    }

    // ── shared state ──────────────────────────────────────────────────────

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Edits take effect at the next upload (at most one per frame).
    #[inline]
    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    #[inline]
    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    #[inline]
    pub fn assets_mut(&mut self) -> &mut Assets {
        &mut self.assets
    }

    /// Frames started so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn window_size(&self) -> Pixel {
        self.window_size
    }

    // ── canvases ──────────────────────────────────────────────────────────

    /// Reserves a canvas. GPU resources are built on its first paint.
    pub fn create_canvas(&mut self, config: CanvasConfig) -> Result<CanvasId, SetupError> {
        if let Some(name) = config.name.as_deref() {
            if self.canvases.find(name).is_some() {
                return Err(SetupError::DuplicateName(name.to_string()));
            }
        }

        let mut canvas = Canvas::new(config);
        canvas.apply_layout(self.window_size);
        let id = self.canvases.insert(canvas)?;
        log::debug!("created canvas {id:?}");
        Ok(id)
    }

    #[inline]
    pub fn canvas(&self, id: CanvasId) -> Option<&Canvas> {
        self.canvases.get(id)
    }

    #[inline]
    pub fn canvas_mut(&mut self, id: CanvasId) -> Option<&mut Canvas> {
        self.canvases.get_mut(id)
    }

    pub fn canvas_by_name(&self, name: &str) -> Option<CanvasId> {
        self.canvases.find(name)
    }

    /// Frees the canvas and its GPU target. `id` becomes stale.
    pub fn destroy_canvas(&mut self, id: CanvasId, gpu: &mut dyn GpuFacade) -> Result<(), SetupError> {
        let mut canvas = self.canvases.remove(id).ok_or(SetupError::UnknownCanvas(id))?;
        canvas.release(gpu);
        log::debug!("destroyed canvas {id:?}");
        Ok(())
    }

    /// Changes the zoom policy at the next frame boundary.
    pub fn set_zoom(&mut self, id: CanvasId, zoom: Zoom) -> Result<(), SetupError> {
        let canvas = self.canvases.get_mut(id).ok_or(SetupError::UnknownCanvas(id))?;
        canvas.request_zoom(zoom);
        Ok(())
    }

    /// Changes the target resolution at the next frame boundary.
    ///
    /// Components are clamped to at least one pixel.
    pub fn set_resolution(&mut self, id: CanvasId, width: i16, height: i16) -> Result<(), SetupError> {
        let canvas = self.canvases.get_mut(id).ok_or(SetupError::UnknownCanvas(id))?;
        canvas.request_resolution(Pixel::new(width.max(1), height.max(1)));
        Ok(())
    }

    /// Text writer bound to the canvas's cursor and batch.
    pub fn text(&mut self, id: CanvasId) -> Option<TextWriter<'_>> {
        let canvas = self.canvases.get_mut(id)?;
        let (cursor, batch) = canvas.text_parts();
        Some(TextWriter::new(cursor, batch, &self.assets))
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Records a new window size. Applied by the next [`begin_frame`](Self::begin_frame).
    #[inline]
    pub fn resize(&mut self, window_size: Pixel) {
        self.pending_resize = Some(window_size);
    }

    /// Frame boundary: applies pending resize and zoom changes, re-arms
    /// overflow warnings and the per-frame upload guard.
    pub fn begin_frame(&mut self) {
        self.frame += 1;
        self.uploads = SharedUploads::default();

        let resized = self.pending_resize.take();
        if let Some(size) = resized {
            self.window_size = size;
        }

        let window = self.window_size;
        for (_, canvas) in self.canvases.iter_mut() {
            if resized.is_some() || canvas.has_pending_layout() {
                canvas.apply_layout(window);
            }
            canvas.new_frame();
        }
    }

    /// Uploads dirty shared tables, unless already uploaded this frame.
    fn upload_shared(&mut self, gpu: &mut dyn GpuFacade) -> anyhow::Result<()> {
        if self.palette.is_dirty() {
            if self.uploads.palette {
                log::debug!("palette changed after upload; deferring to next frame");
            } else {
                gpu.upload_palette(self.palette.colors())
                    .context("while uploading palette")?;
                self.palette.mark_uploaded();
                self.uploads.palette = true;
            }
        }

        let (glyphs, pictures) = self.assets.atlases_mut();
        for (kind, atlas, done) in [
            (AtlasKind::Glyphs, glyphs, &mut self.uploads.glyphs),
            (AtlasKind::Pictures, pictures, &mut self.uploads.pictures),
        ] {
            if !atlas.is_dirty() || *done {
                continue;
            }
            gpu.upload_atlas(kind, atlas.pages(), atlas.entries())
                .with_context(|| format!("while uploading {kind:?} atlas"))?;
            atlas.mark_uploaded();
            *done = true;
        }
        Ok(())
    }

    /// Flushes the canvas's batch into its target.
    ///
    /// Builds (or rebuilds) the target first and applies a pending clear.
    pub fn paint(&mut self, id: CanvasId, gpu: &mut dyn GpuFacade) -> anyhow::Result<()> {
        if self.canvases.get(id).is_none() {
            return Err(SetupError::UnknownCanvas(id).into());
        }
        self.upload_shared(gpu)?;

        let canvas = self.canvases.get_mut(id).ok_or(SetupError::UnknownCanvas(id))?;
        canvas.paint(&self.palette, gpu)
    }

    /// [`paint`](Self::paint), then places the canvas on the window.
    pub fn display(&mut self, id: CanvasId, gpu: &mut dyn GpuFacade) -> anyhow::Result<()> {
        if self.canvases.get(id).is_none() {
            return Err(SetupError::UnknownCanvas(id).into());
        }
        self.upload_shared(gpu)?;

        let canvas = self.canvases.get_mut(id).ok_or(SetupError::UnknownCanvas(id))?;
        canvas.display(&self.palette, gpu)
    }
}

impl Default for PixelContext {
    fn default() -> Self {
        Self::new()
    }
}
