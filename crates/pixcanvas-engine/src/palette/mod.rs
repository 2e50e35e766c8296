//! Palette and color index resolution.
//!
//! Canvases store and draw palette indices; the active [`Palette`] maps them to
//! sRGB colors on the GPU. Index 0 is always transparent.

pub mod c64;
mod color;
mod table;

pub use color::Color;
pub use table::{ColorIndex, Palette, PALETTE_SIZE};
