//! Shape encoders: one `CommandBatch::push_*` helper per shape kind.

pub(crate) mod boxes;
pub(crate) mod glyph;
pub(crate) mod line;
pub(crate) mod picture;
pub(crate) mod triangle;
