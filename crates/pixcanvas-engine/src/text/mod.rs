//! Text layout on a canvas.
//!
//! A [`TextCursor`] turns characters into glyph commands; a [`TextWriter`]
//! binds a cursor to its canvas batch and the font registry so that
//! `write!` works.

mod cursor;
mod writer;

pub use cursor::TextCursor;
pub use writer::TextWriter;
