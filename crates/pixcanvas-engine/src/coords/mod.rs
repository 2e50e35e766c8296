//! Integer pixel geometry shared by canvases, atlases and the GPU encoding.
//!
//! Canonical space:
//! - canvas pixels (one unit = one logical pixel before zoom)
//! - origin top-left
//! - +X right, +Y down

mod pixel;
mod rect;

pub use pixel::Pixel;
pub use rect::Rect;
