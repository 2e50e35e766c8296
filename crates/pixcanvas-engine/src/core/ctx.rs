use anyhow::Result;
use winit::window::Window;

use crate::coords::Pixel;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::gpu::GpuFacade;
use crate::palette::Color;
use crate::render::{PixelRenderer, RenderCtx, RenderTarget, WgpuFacade};
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub renderer: &'a mut PixelRenderer,
    pub runtime: &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Drawable size in physical pixels.
    #[inline]
    pub fn window_size(&self) -> Pixel {
        self.gpu.surface_size()
    }

    /// Fills the window with `border`, calls `draw` with a [`GpuFacade`] bound
    /// to this frame, then presents.
    ///
    /// `border` shows wherever no canvas is blitted (the margins left by
    /// autozoom). The frame is presented even when `draw` fails; the error is
    /// returned afterwards.
    pub fn render<F>(&mut self, border: Color, draw: F) -> Result<AppControl>
    where
        F: FnOnce(&mut dyn GpuFacade) -> Result<()>,
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let action = self.gpu.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    return Ok(AppControl::Exit);
                }
                return Ok(AppControl::Continue);
            }
        };

        frame.clear(window_color(border, self.gpu.surface_format()));

        let rctx = RenderCtx::from_gpu(self.gpu, frame.size());

        // The target borrows the frame; it must be gone before submit().
        let result = {
            let mut target = RenderTarget::for_frame(&mut frame);
            let mut facade = WgpuFacade::new(self.renderer, &rctx, &mut target);
            draw(&mut facade)
        };

        self.window.pre_present_notify();
        self.gpu.submit(frame);

        result.map(|()| AppControl::Continue)
    }
}

/// Clear color for the window surface. sRGB surfaces expect linear values.
fn window_color(c: Color, format: wgpu::TextureFormat) -> wgpu::Color {
    let c = if format.is_srgb() { c.to_linear() } else { c };
    wgpu::Color {
        r: c.r as f64,
        g: c.g as f64,
        b: c.b as f64,
        a: 1.0,
    }
}
