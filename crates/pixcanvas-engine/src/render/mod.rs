//! wgpu backend for canvases.
//!
//! [`PixelRenderer`] owns the GPU side of every canvas plus the shared
//! palette and atlases. [`WgpuFacade`] exposes it to the context as a
//! [`GpuFacade`](crate::gpu::GpuFacade) for one frame.
//!
//! Convention:
//! - canvas coordinates are in canvas pixels (top-left origin, +Y down)
//! - the vertex shader converts to NDC using the target size uniform
//! - larger depth values win; equal depth keeps the later shape

mod common;
mod ctx;
mod facade;
mod pixel_renderer;
mod target;

pub use ctx::{RenderCtx, RenderTarget};
pub use facade::WgpuFacade;
pub use pixel_renderer::PixelRenderer;
