use crate::coords::Pixel;
use crate::device::{Gpu, GpuFrame};

/// Device handles and window surface facts the renderer needs for one frame.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Size of the swapchain image being drawn, in physical pixels.
    pub surface_size: Pixel,
}

impl<'a> RenderCtx<'a> {
    /// Context for drawing into an image of `surface_size` acquired from `gpu`.
    #[inline]
    pub fn from_gpu(gpu: &'a Gpu<'_>, surface_size: Pixel) -> Self {
        Self {
            device: gpu.device(),
            queue: gpu.queue(),
            surface_format: gpu.surface_format(),
            surface_size,
        }
    }
}

/// Where the renderer records: the frame encoder plus the swapchain view
/// canvases are blitted onto.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn for_frame(frame: &'a mut GpuFrame) -> Self {
        Self {
            encoder: &mut frame.encoder,
            color_view: &frame.view,
        }
    }
}
