//! colorgrab - screen color picker
//!
//! Reads the pixel under the mouse cursor, shows it in a small tooltip that
//! follows the pointer, and copies it to the clipboard on click or Enter.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Colors, formats, tooltip placement, session state, config
//! - **Application**: The pick use case and port interfaces (traits)
//! - **Infrastructure**: X11 display, clipboard, notification and config adapters
//! - **GUI**: Tooltip rendering with tiny-skia and fontdue
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod gui;
pub mod infrastructure;
