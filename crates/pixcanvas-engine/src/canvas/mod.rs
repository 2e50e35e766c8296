//! Canvases: logical pixel render targets with their own zoom, origin and
//! command batch.
//!
//! Responsibilities:
//! - resolve the canvas size against the window (autozoom / fixed zoom)
//! - record shape calls into the canvas's [`CommandBatch`](crate::scene::CommandBatch)
//! - flush the batch and place the result on the window through a
//!   [`GpuFacade`](crate::gpu::GpuFacade)
//! - hand out generational handles so stale ids never alias a new canvas

mod canvas;
mod config;
mod layout;
mod registry;

pub use canvas::Canvas;
pub use config::{CanvasConfig, Zoom};
pub use layout::Layout;
pub use registry::{CanvasId, CanvasRegistry, MAX_CANVASES};

/// Errors raised while setting up canvases.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("too many canvases (limit is {0})")]
    TooManyCanvases(usize),
    #[error("a canvas named \"{0}\" already exists")]
    DuplicateName(String),
    #[error("unknown or destroyed canvas {0:?}")]
    UnknownCanvas(CanvasId),
}
