pub mod buffer;
pub mod color;
pub mod glyph;
