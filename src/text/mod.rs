//! Text shaping helpers for page layout.

pub mod wrap;

pub use wrap::wrap_line;
