//! Screen sampling port interface

use thiserror::Error;

use crate::domain::color::SampledColor;
use crate::domain::picker::{Point, Size};

/// Sampling errors.
/// These are recoverable: the picker keeps the last good color and retries.
#[derive(Debug, Clone, Error)]
pub enum SampleError {
    #[error("Cursor position unavailable: {0}")]
    CursorUnavailable(String),

    #[error("Pixel at ({x}, {y}) unavailable: {reason}")]
    PixelUnavailable { x: i32, y: i32, reason: String },
}

/// Port for reading the cursor position and on-screen pixels
pub trait ScreenSampler {
    /// Current cursor position in screen coordinates.
    fn cursor_position(&mut self) -> Result<Point, SampleError>;

    /// Color currently displayed at `at`.
    fn sample(&mut self, at: Point) -> Result<SampledColor, SampleError>;

    /// Size of the screen the cursor lives on.
    fn screen_size(&self) -> Size;
}
