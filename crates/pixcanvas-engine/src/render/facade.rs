use anyhow::Result;

use crate::atlas::{AtlasEntry, IndexedImage};
use crate::coords::Pixel;
use crate::gpu::{AtlasKind, Blit, GpuFacade, TargetId};
use crate::palette::Color;
use crate::scene::{Capacity, DrawCmd, Param};

use super::ctx::{RenderCtx, RenderTarget};
use super::pixel_renderer::PixelRenderer;

/// [`GpuFacade`] over wgpu for the duration of one frame.
///
/// Everything is recorded on the frame's encoder; blits land on the window
/// view held by `target`.
pub struct WgpuFacade<'a, 'r> {
    renderer: &'a mut PixelRenderer,
    ctx: &'a RenderCtx<'r>,
    target: &'a mut RenderTarget<'r>,
}

impl<'a, 'r> WgpuFacade<'a, 'r> {
    #[inline]
    pub fn new(renderer: &'a mut PixelRenderer, ctx: &'a RenderCtx<'r>, target: &'a mut RenderTarget<'r>) -> Self {
        Self { renderer, ctx, target }
    }
}

impl GpuFacade for WgpuFacade<'_, '_> {
    fn create_target(&mut self, size: Pixel, capacity: Capacity) -> Result<TargetId> {
        self.renderer.create_target(self.ctx, size, capacity)
    }

    fn resize_target(&mut self, id: TargetId, size: Pixel) -> Result<()> {
        self.renderer.resize_target(self.ctx, id, size)
    }

    fn destroy_target(&mut self, id: TargetId) {
        self.renderer.destroy_target(id);
    }

    fn upload_palette(&mut self, colors: &[Color]) -> Result<()> {
        self.renderer.upload_palette(self.ctx, colors)
    }

    fn upload_atlas(&mut self, kind: AtlasKind, pages: &[IndexedImage], entries: &[AtlasEntry]) -> Result<()> {
        self.renderer.upload_atlas(self.ctx, kind, pages, entries)
    }

    fn clear_target(&mut self, id: TargetId, color: Color) -> Result<()> {
        self.renderer.clear_target(self.target, id, color)
    }

    fn draw_indirect(&mut self, id: TargetId, commands: &[DrawCmd], params: &[Param]) -> Result<()> {
        self.renderer.draw_indirect(self.ctx, self.target, id, commands, params)
    }

    fn blit_to_window(&mut self, id: TargetId, blit: Blit) -> Result<()> {
        self.renderer.blit_to_window(self.ctx, self.target, id, blit)
    }
}
