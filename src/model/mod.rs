//! Data models for the color editor.

mod color;
mod field;
mod rgba;

pub use color::{ColorMode, ColorModel, ColorState};
pub use field::{Component, Field};
pub use rgba::Rgba;
