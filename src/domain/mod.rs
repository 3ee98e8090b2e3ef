//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod color;
pub mod config;
pub mod error;
pub mod picker;

// Re-export common types
pub use color::{ColorFormat, SampledColor};
pub use config::AppConfig;
pub use error::*;
pub use picker::{Offset, PickerSession, PickerState, Point, PollInterval, Size, TooltipLabel};
