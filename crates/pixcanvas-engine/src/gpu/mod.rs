//! Boundary between canvases and the GPU.
//!
//! Canvases never touch GPU objects directly: they go through [`GpuFacade`].
//! The wgpu implementation lives in `render`; [`RecordingGpu`] keeps calls in
//! memory for tests and headless tools.

mod facade;
mod recording;

pub use facade::{AtlasKind, Blit, GpuFacade, TargetId};
pub use recording::{GpuCall, RecordingGpu};
