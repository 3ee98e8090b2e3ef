//! Color value objects

mod format;
mod sampled_color;

pub use format::{ColorFormat, ALL_FORMATS};
pub use sampled_color::SampledColor;
