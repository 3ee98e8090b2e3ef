//! Application layer - Use cases and port interfaces
//!
//! Contains the picking workflow and the trait definitions
//! for screen, tooltip, clipboard and notification access.

pub mod pick;
pub mod ports;

// Re-export use cases
pub use pick::{PickCallbacks, PickColorUseCase, PickError, PickInput, PickOutcome};
