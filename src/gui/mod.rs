//! Tooltip rendering
//!
//! Rasterises tooltip labels with tiny-skia; the display backend only has to
//! copy the resulting pixels into its window.

pub mod glyphs;
pub mod tooltip;

pub use glyphs::GlyphSource;
pub use tooltip::{RenderError, TooltipRenderer};
