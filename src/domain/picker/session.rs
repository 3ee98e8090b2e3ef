//! Picker session state machine

use std::fmt;
use thiserror::Error;

use crate::domain::color::SampledColor;

/// Picker states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PickerState {
    #[default]
    Idle,
    Sampling,
    Committed,
    Cancelled,
}

impl PickerState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Sampling => "sampling",
            Self::Committed => "committed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the session has ended
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Committed | Self::Cancelled)
    }
}

impl fmt::Display for PickerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Invalid state transition: cannot {action} while in {current_state} state")]
    InvalidTransition {
        current_state: PickerState,
        action: &'static str,
    },

    #[error("Nothing to commit: no pixel has been sampled yet")]
    NothingSampled,
}

/// One pick-and-copy cycle.
///
/// State machine:
///   IDLE -> SAMPLING (begin)
///   SAMPLING -> SAMPLING (update)
///   SAMPLING -> COMMITTED (commit, requires a sampled color)
///   SAMPLING -> CANCELLED (cancel)
///
/// COMMITTED and CANCELLED are terminal.
#[derive(Debug, Default)]
pub struct PickerSession {
    state: PickerState,
    current: Option<SampledColor>,
}

impl PickerSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> PickerState {
        self.state
    }

    /// The most recently sampled color
    pub fn current(&self) -> Option<SampledColor> {
        self.current
    }

    /// Check if currently sampling
    pub fn is_sampling(&self) -> bool {
        self.state == PickerState::Sampling
    }

    /// Transition from IDLE to SAMPLING
    pub fn begin(&mut self) -> Result<(), SessionError> {
        self.expect(PickerState::Idle, "begin sampling")?;
        self.state = PickerState::Sampling;
        Ok(())
    }

    /// Replace the current color with a fresh sample
    pub fn update(&mut self, color: SampledColor) -> Result<(), SessionError> {
        self.expect(PickerState::Sampling, "update color")?;
        self.current = Some(color);
        Ok(())
    }

    /// Transition from SAMPLING to COMMITTED, handing out the current color
    pub fn commit(&mut self) -> Result<SampledColor, SessionError> {
        self.expect(PickerState::Sampling, "commit")?;
        let color = self.current.ok_or(SessionError::NothingSampled)?;
        self.state = PickerState::Committed;
        Ok(color)
    }

    /// Transition from SAMPLING to CANCELLED
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.expect(PickerState::Sampling, "cancel")?;
        self.state = PickerState::Cancelled;
        Ok(())
    }

    fn expect(&self, state: PickerState, action: &'static str) -> Result<(), SessionError> {
        if self.state != state {
            return Err(SessionError::InvalidTransition {
                current_state: self.state,
                action,
            });
        }
        Ok(())
    }
}
