use crate::atlas::{AtlasEntry, IndexedImage};
use crate::coords::Pixel;
use crate::palette::Color;
use crate::scene::{Capacity, DrawCmd, Param};

/// Opaque handle to an offscreen canvas target (color + depth + command and
/// parameter buffers), issued by a [`GpuFacade`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TargetId(pub u32);

/// Which shared atlas an upload refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AtlasKind {
    Glyphs,
    Pictures,
}

/// Placement of a canvas on the window.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Blit {
    /// Top-left corner in window pixels.
    pub origin: Pixel,
    /// Window pixels per canvas pixel.
    pub pixel: i16,
    /// Canvas size in canvas pixels.
    pub size: Pixel,
}

/// GPU operations used by canvases.
///
/// Ordering contract: shared tables (palette, atlases) are uploaded before any
/// `draw_indirect` that reads them within a frame; commands of one
/// `draw_indirect` execute in slice order.
pub trait GpuFacade {
    /// Builds a target of `size` with buffers for `capacity`.
    fn create_target(&mut self, size: Pixel, capacity: Capacity) -> anyhow::Result<TargetId>;

    /// Rebuilds the color and depth attachments of `id` at `size`.
    fn resize_target(&mut self, id: TargetId, size: Pixel) -> anyhow::Result<()>;

    fn destroy_target(&mut self, id: TargetId);

    /// Replaces the shared palette table (256 entries, index 0 transparent).
    fn upload_palette(&mut self, colors: &[Color]) -> anyhow::Result<()>;

    /// Replaces the pages and mapping table of one atlas.
    fn upload_atlas(&mut self, kind: AtlasKind, pages: &[IndexedImage], entries: &[AtlasEntry]) -> anyhow::Result<()>;

    /// Fills the color attachment with `color` and resets depth to its minimum.
    fn clear_target(&mut self, id: TargetId, color: Color) -> anyhow::Result<()>;

    /// Uploads `commands` and `params` and issues them as one indirect multi-draw.
    fn draw_indirect(&mut self, id: TargetId, commands: &[DrawCmd], params: &[Param]) -> anyhow::Result<()>;

    /// Copies the target onto the window, nearest-neighbor, scaled by `blit.pixel`.
    fn blit_to_window(&mut self, id: TargetId, blit: Blit) -> anyhow::Result<()>;
}
