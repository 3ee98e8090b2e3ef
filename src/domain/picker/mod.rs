//! Picker session, timing and tooltip geometry

mod interval;
mod label;
mod placement;
mod session;

pub use interval::{PollInterval, DEFAULT_INTERVAL_MS, MAX_INTERVAL_MS, MIN_INTERVAL_MS};
pub use label::{LabelKind, TooltipLabel};
pub use placement::{place_tooltip, Offset, Point, Size};
pub use session::{PickerSession, PickerState, SessionError};
