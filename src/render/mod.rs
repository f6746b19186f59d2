//! Rendering module for converting generated lists to output formats.

mod json;
mod options;
mod text;

pub use json::{to_json, JsonFormat};
pub use options::RenderOptions;
pub use text::to_text;
