use anyhow::Context;

use crate::assets::PictureId;
use crate::coords::Pixel;
use crate::gpu::{Blit, GpuFacade, TargetId};
use crate::palette::{ColorIndex, Palette};
use crate::scene::CommandBatch;
use crate::text::TextCursor;

use super::{CanvasConfig, Layout, Zoom};

/// A logical pixel render target.
///
/// Shape calls only append to the canvas's batch; nothing reaches the GPU
/// until [`PixelContext::paint`](crate::context::PixelContext::paint).
#[derive(Debug)]
pub struct Canvas {
    name: Option<String>,
    resolution: Pixel,
    zoom: Zoom,
    pending_zoom: Option<Zoom>,
    pending_resolution: Option<Pixel>,
    layout: Layout,

    batch: CommandBatch,
    cursor: TextCursor,
    pending_clear: Option<ColorIndex>,

    target: Option<TargetId>,
    target_size: Pixel,
}

impl Canvas {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            layout: Layout::initial(config.resolution, config.zoom),
            name: config.name,
            resolution: config.resolution,
            zoom: config.zoom,
            pending_zoom: None,
            pending_resolution: None,
            batch: CommandBatch::new(config.capacity),
            cursor: TextCursor::new(),
            pending_clear: None,
            target: None,
            target_size: Pixel::zero(),
        }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Fills the whole canvas with `color` and resets depth.
    ///
    /// The fill is the first thing the next paint does; every shape still in
    /// the batch, including ones recorded before this call, is drawn on top.
    pub fn clear(&mut self, color: ColorIndex) {
        self.pending_clear = Some(color);
    }

    /// See [`CommandBatch::push_box`].
    #[inline]
    pub fn draw_box(&mut self, fg: ColorIndex, bg: ColorIndex, corner: i16, depth: i16, p1: Pixel, p2: Pixel) -> bool {
        self.batch.push_box(fg, bg, corner, depth, p1, p2)
    }

    #[inline]
    pub fn draw_line(&mut self, color: ColorIndex, depth: i16, a: Pixel, b: Pixel) -> bool {
        self.batch.push_line(color, depth, a, b)
    }

    #[inline]
    pub fn draw_triangle(&mut self, color: ColorIndex, depth: i16, a: Pixel, b: Pixel, c: Pixel) -> bool {
        self.batch.push_triangle(color, depth, a, b, c)
    }

    #[inline]
    pub fn draw_point(&mut self, color: ColorIndex, depth: i16, p: Pixel) -> bool {
        self.batch.push_point(color, depth, p)
    }

    #[inline]
    pub fn draw_picture(&mut self, picture: PictureId, depth: i16, pos: Pixel) -> bool {
        self.batch.push_picture(picture, depth, pos)
    }

    // ── queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Current size in canvas pixels.
    #[inline]
    pub fn size(&self) -> Pixel {
        self.layout.size
    }

    /// Window pixels per canvas pixel.
    #[inline]
    pub fn pixel_size(&self) -> i16 {
        self.layout.pixel
    }

    /// Top-left corner on the window.
    #[inline]
    pub fn origin(&self) -> Pixel {
        self.layout.origin
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[inline]
    pub fn resolution(&self) -> Pixel {
        self.resolution
    }

    #[inline]
    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    /// Maps a window position (e.g. the mouse) to canvas pixels.
    #[inline]
    pub fn window_to_canvas(&self, p: Pixel) -> Pixel {
        self.layout.window_to_canvas(p)
    }

    #[inline]
    pub fn batch(&self) -> &CommandBatch {
        &self.batch
    }

    #[inline]
    pub fn cursor(&self) -> &TextCursor {
        &self.cursor
    }

    #[inline]
    pub fn cursor_mut(&mut self) -> &mut TextCursor {
        &mut self.cursor
    }

    #[inline]
    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    // ── frame boundary ────────────────────────────────────────────────────

    pub(crate) fn text_parts(&mut self) -> (&mut TextCursor, &mut CommandBatch) {
        (&mut self.cursor, &mut self.batch)
    }

    pub(crate) fn request_zoom(&mut self, zoom: Zoom) {
        self.pending_zoom = Some(zoom);
    }

    pub(crate) fn request_resolution(&mut self, resolution: Pixel) {
        self.pending_resolution = Some(resolution);
    }

    pub(crate) fn has_pending_layout(&self) -> bool {
        self.pending_zoom.is_some() || self.pending_resolution.is_some()
    }

    /// Applies a pending zoom or resolution and fits the canvas to `window`.
    ///
    /// A zero-area window keeps the previous layout.
    pub(crate) fn apply_layout(&mut self, window: Pixel) {
        if let Some(zoom) = self.pending_zoom.take() {
            self.zoom = zoom;
        }
        if let Some(resolution) = self.pending_resolution.take() {
            self.resolution = resolution;
        }
        if let Some(layout) = Layout::resolve(window, self.resolution, self.zoom) {
            if layout != self.layout {
                log::debug!(
                    "canvas {:?}: {}x{} at x{} (origin {},{})",
                    self.name,
                    layout.size.x,
                    layout.size.y,
                    layout.pixel,
                    layout.origin.x,
                    layout.origin.y,
                );
            }
            self.layout = layout;
        }
    }

    pub(crate) fn new_frame(&mut self) {
        self.batch.new_frame();
    }

    // ── GPU ───────────────────────────────────────────────────────────────

    /// Builds the target on first use and rebuilds it after a size change.
    fn ensure_target(&mut self, gpu: &mut dyn GpuFacade) -> anyhow::Result<TargetId> {
        let size = self.layout.size;
        match self.target {
            Some(id) if self.target_size == size => Ok(id),
            Some(id) => {
                gpu.resize_target(id, size)?;
                self.target_size = size;
                Ok(id)
            }
            None => {
                let id = gpu.create_target(size, self.batch.capacity())?;
                self.target = Some(id);
                self.target_size = size;
                Ok(id)
            }
        }
    }

    /// Applies a pending clear, then flushes the batch as one indirect draw.
    pub(crate) fn paint(&mut self, palette: &Palette, gpu: &mut dyn GpuFacade) -> anyhow::Result<()> {
        let target = self
            .ensure_target(gpu)
            .context("while creating canvas textures")?;

        if let Some(color) = self.pending_clear.take() {
            gpu.clear_target(target, palette.resolve(color))
                .context("while clearing canvas")?;
        }

        if self.batch.is_empty() {
            return Ok(());
        }

        gpu.draw_indirect(target, self.batch.commands(), self.batch.params())
            .context("while painting canvas")?;
        self.batch.clear();
        Ok(())
    }

    /// Paints, then places the canvas on the window.
    pub(crate) fn display(&mut self, palette: &Palette, gpu: &mut dyn GpuFacade) -> anyhow::Result<()> {
        self.paint(palette, gpu)?;

        let Some(target) = self.target else {
            return Ok(());
        };
        let blit = Blit {
            origin: self.layout.origin,
            pixel: self.layout.pixel,
            size: self.layout.size,
        };
        gpu.blit_to_window(target, blit).context("while displaying canvas")
    }

    /// Releases the GPU target, if any.
    pub(crate) fn release(&mut self, gpu: &mut dyn GpuFacade) {
        if let Some(id) = self.target.take() {
            gpu.destroy_target(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::{GpuCall, RecordingGpu};

    #[test]
    fn shapes_recorded_before_clear_are_drawn_over_it() {
        let mut gpu = RecordingGpu::new();
        let palette = Palette::c64();
        let mut cv = Canvas::new(CanvasConfig::default());
        cv.draw_point(ColorIndex(2), 0, Pixel::zero());
        cv.clear(ColorIndex(0));
        assert_eq!(cv.batch().len(), 1);

        cv.paint(&palette, &mut gpu).unwrap();
        let clear = gpu.calls().iter().position(|c| matches!(c, GpuCall::ClearTarget { .. }));
        let draw = gpu.calls().iter().position(|c| matches!(c, GpuCall::DrawIndirect { .. }));
        assert!(clear.is_some() && draw.is_some());
        assert!(clear < draw);
        assert!(cv.batch().is_empty());
    }

    #[test]
    fn target_follows_layout_size() {
        let mut gpu = RecordingGpu::new();
        let palette = Palette::new();
        let mut cv = Canvas::new(CanvasConfig::default().resolution(320, 180).autozoom());

        cv.paint(&palette, &mut gpu).unwrap();
        let id = cv.target().unwrap();
        assert_eq!(gpu.target_size(id), Some(Pixel::new(320, 180)));

        cv.apply_layout(Pixel::new(1000, 700));
        cv.paint(&palette, &mut gpu).unwrap();
        assert_eq!(gpu.target_size(id), Some(Pixel::new(333, 233)));

        // Same size: no rebuild.
        cv.paint(&palette, &mut gpu).unwrap();
        assert_eq!(gpu.count(|c| matches!(c, GpuCall::ResizeTarget { .. })), 1);
    }

    #[test]
    fn pending_zoom_applies_at_layout() {
        let mut cv = Canvas::new(CanvasConfig::default().resolution(100, 100).zoom(1));
        cv.request_zoom(Zoom::Fixed(4));
        assert_eq!(cv.pixel_size(), 1);

        cv.apply_layout(Pixel::new(400, 400));
        assert_eq!(cv.zoom(), Zoom::Fixed(4));
        assert_eq!((cv.pixel_size(), cv.size()), (4, Pixel::new(100, 100)));
    }

    #[test]
    fn pending_resolution_applies_at_layout() {
        let mut cv = Canvas::new(CanvasConfig::default().resolution(640, 360).autozoom());
        cv.apply_layout(Pixel::new(1280, 720));
        assert_eq!(cv.pixel_size(), 2);

        cv.request_resolution(Pixel::new(320, 180));
        assert!(cv.has_pending_layout());
        assert_eq!(cv.resolution(), Pixel::new(640, 360));

        cv.apply_layout(Pixel::new(1280, 720));
        assert!(!cv.has_pending_layout());
        assert_eq!(cv.resolution(), Pixel::new(320, 180));
        assert_eq!((cv.pixel_size(), cv.size()), (4, Pixel::new(320, 180)));
    }

    #[test]
    fn minimized_window_keeps_layout() {
        let mut cv = Canvas::new(CanvasConfig::default().autozoom());
        cv.apply_layout(Pixel::new(1280, 720));
        let before = cv.layout();
        cv.apply_layout(Pixel::new(0, 0));
        assert_eq!(cv.layout(), before);
    }
}
