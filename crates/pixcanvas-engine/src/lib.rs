//! pixcanvas engine crate.
//!
//! Deferred pixel-art canvases: shapes and text recorded on the CPU during a
//! frame, flushed per canvas as one indirect multi-draw, then blitted onto
//! the window at an integer zoom.
//!
//! Layers, bottom-up:
//! - `coords`, `palette`, `atlas`, `assets`: data and load-time packing
//! - `scene`, `text`, `canvas`, `context`: per-frame recording and layout
//! - `gpu`: the facade canvases paint through
//! - `render`, `device`, `window`, `core`: the wgpu/winit backend

pub mod assets;
pub mod atlas;
pub mod canvas;
pub mod context;
pub mod coords;
pub mod core;
pub mod device;
pub mod gpu;
pub mod logging;
pub mod palette;
pub mod render;
pub mod scene;
pub mod text;
pub mod window;

#[cfg(test)]
pub(crate) mod test_support;

pub use canvas::{Canvas, CanvasConfig, CanvasId, Zoom};
pub use context::PixelContext;
pub use coords::Pixel;
pub use palette::{Color, ColorIndex, Palette};
