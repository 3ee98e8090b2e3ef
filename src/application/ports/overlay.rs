//! Tooltip overlay port interface

use thiserror::Error;

use crate::domain::picker::{Point, Size, TooltipLabel};

/// User input relevant to a picking session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Take the color currently displayed
    Commit,
    /// Close without copying
    Cancel,
}

/// Overlay errors. These end the session.
#[derive(Debug, Clone, Error)]
pub enum OverlayError {
    #[error("Display connection lost: {0}")]
    ConnectionLost(String),

    #[error("Failed to draw tooltip: {0}")]
    DrawFailed(String),
}

/// Port for the floating tooltip window and the input it captures
pub trait Overlay {
    /// Size the tooltip will have when showing `label`.
    fn measure(&self, label: &TooltipLabel) -> Size;

    /// Draw `label` with the tooltip's top-left corner at `origin`, on top of
    /// every other window.
    fn show(&mut self, label: &TooltipLabel, origin: Point) -> Result<(), OverlayError>;

    /// Input received since the last call, oldest first. Never blocks.
    fn poll_input(&mut self) -> Result<Vec<InputEvent>, OverlayError>;

    /// Hide the tooltip and release any input grabs.
    fn close(&mut self) -> Result<(), OverlayError>;
}
