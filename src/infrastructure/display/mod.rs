//! Display backends: cursor position, pixel sampling and the tooltip window
//!
//! X11 is the only backend. Wayland sessions work through XWayland as long as
//! `DISPLAY` is set, though most compositors only expose XWayland windows to
//! X11 clients.

#[cfg(all(unix, not(target_os = "macos")))]
mod x11;

#[cfg(all(unix, not(target_os = "macos")))]
pub use x11::{X11Screen, X11Tooltip};

use thiserror::Error;

use crate::gui::TooltipRenderer;

/// Errors raised while opening the display
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("No display available: {0}")]
    Unavailable(String),

    #[error("Unsupported display: {0}")]
    Unsupported(String),

    #[error("Could not grab the {0}; another program is holding it")]
    GrabFailed(&'static str),

    #[error("Display request failed: {0}")]
    Protocol(String),
}

/// Open the display and split it into a sampler and a tooltip overlay.
///
/// Grabs the pointer and keyboard for the lifetime of the tooltip.
#[cfg(all(unix, not(target_os = "macos")))]
pub fn connect(renderer: TooltipRenderer) -> Result<(X11Screen, X11Tooltip), DisplayError> {
    x11::connect(renderer)
}

/// Open the display and split it into a sampler and a tooltip overlay.
#[cfg(not(all(unix, not(target_os = "macos"))))]
pub fn connect(
    renderer: TooltipRenderer,
) -> Result<(UnsupportedScreen, UnsupportedOverlay), DisplayError> {
    let _ = renderer;
    Err(DisplayError::Unsupported(format!(
        "{} is not supported, colorgrab needs an X11 display",
        std::env::consts::OS
    )))
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
pub use unsupported::{UnsupportedOverlay, UnsupportedScreen};

/// Placeholder port types so callers type-check on platforms without a backend
#[cfg(not(all(unix, not(target_os = "macos"))))]
mod unsupported {
    use crate::application::ports::{
        InputEvent, Overlay, OverlayError, SampleError, ScreenSampler,
    };
    use crate::domain::color::SampledColor;
    use crate::domain::picker::{Point, Size, TooltipLabel};

    pub enum UnsupportedScreen {}
    pub enum UnsupportedOverlay {}

    impl ScreenSampler for UnsupportedScreen {
        fn cursor_position(&mut self) -> Result<Point, SampleError> {
            match *self {}
        }

        fn sample(&mut self, _at: Point) -> Result<SampledColor, SampleError> {
            match *self {}
        }

        fn screen_size(&self) -> Size {
            match *self {}
        }
    }

    impl Overlay for UnsupportedOverlay {
        fn measure(&self, _label: &TooltipLabel) -> Size {
            match *self {}
        }

        fn show(&mut self, _label: &TooltipLabel, _origin: Point) -> Result<(), OverlayError> {
            match *self {}
        }

        fn poll_input(&mut self) -> Result<Vec<InputEvent>, OverlayError> {
            match *self {}
        }

        fn close(&mut self) -> Result<(), OverlayError> {
            match *self {}
        }
    }
}

/// Check that `DISPLAY` names a display
#[cfg(all(unix, not(target_os = "macos")))]
fn display_name() -> Result<String, DisplayError> {
    match std::env::var("DISPLAY") {
        Ok(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(DisplayError::Unavailable(
            "DISPLAY is not set; run colorgrab inside an X11 session".to_string(),
        )),
    }
}
