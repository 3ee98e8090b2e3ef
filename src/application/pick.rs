//! Pick color use case

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use thiserror::Error;
use tokio::time::MissedTickBehavior;

use crate::domain::color::{ColorFormat, SampledColor};
use crate::domain::config::DEFAULT_FAILURE_LINGER_MS;
use crate::domain::picker::{
    place_tooltip, Offset, PickerSession, Point, PollInterval, SessionError, TooltipLabel,
};

use super::ports::{
    Clipboard, ClipboardError, InputEvent, NotificationIcon, Notifier, Overlay, OverlayError,
    SampleError, ScreenSampler,
};

/// Title used for desktop notifications
const NOTIFICATION_TITLE: &str = "colorgrab";

/// Errors that end a picking session abnormally
#[derive(Debug, Error)]
pub enum PickError {
    #[error("Tooltip failed: {0}")]
    Overlay(#[from] OverlayError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Input parameters for the pick use case
#[derive(Debug, Clone)]
pub struct PickInput {
    /// Clipboard text format
    pub format: ColorFormat,
    /// Time between two samples
    pub interval: PollInterval,
    /// Tooltip offset from the cursor
    pub offset: Offset,
    /// Whether to show a notification after a successful copy
    pub notify_on_copy: bool,
    /// How long the failure label stays visible when the copy fails
    pub failure_linger: StdDuration,
}

impl Default for PickInput {
    fn default() -> Self {
        Self {
            format: ColorFormat::default(),
            interval: PollInterval::default(),
            offset: Offset::default(),
            notify_on_copy: false,
            failure_linger: StdDuration::from_millis(DEFAULT_FAILURE_LINGER_MS),
        }
    }
}

/// How a picking session ended
#[derive(Debug, Clone)]
pub enum PickOutcome {
    /// The color text is now on the clipboard
    Copied { color: SampledColor, text: String },
    /// The user committed but the clipboard rejected the text
    CopyFailed {
        color: SampledColor,
        text: String,
        error: ClipboardError,
    },
    /// The user backed out; the clipboard was not touched
    Cancelled,
}

impl PickOutcome {
    /// Committed color, if the session was committed
    pub fn color(&self) -> Option<SampledColor> {
        match self {
            Self::Copied { color, .. } | Self::CopyFailed { color, .. } => Some(*color),
            Self::Cancelled => None,
        }
    }

    /// Formatted text of the committed color
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Copied { text, .. } | Self::CopyFailed { text, .. } => Some(text),
            Self::Cancelled => None,
        }
    }
}

/// Callbacks for diagnostics during a session
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct PickCallbacks {
    /// Called when a tick could not read the cursor or the pixel
    pub on_sample_error: Option<Box<dyn Fn(&SampleError) + Send + Sync>>,
    /// Called for non-fatal conditions worth reporting
    pub on_warning: Option<Box<dyn Fn(&str) + Send + Sync>>,
}

impl PickCallbacks {
    fn sample_error(&self, err: &SampleError) {
        if let Some(ref cb) = self.on_sample_error {
            cb(err);
        }
    }

    fn warning(&self, message: &str) {
        if let Some(ref cb) = self.on_warning {
            cb(message);
        }
    }
}

/// One pick-and-copy cycle: sample under the cursor until the user commits
/// or cancels.
pub struct PickColorUseCase<S, O, C, N>
where
    S: ScreenSampler,
    O: Overlay,
    C: Clipboard,
    N: Notifier,
{
    screen: S,
    overlay: O,
    clipboard: C,
    notifier: N,
    cancel_flag: Arc<AtomicBool>,
}

impl<S, O, C, N> PickColorUseCase<S, O, C, N>
where
    S: ScreenSampler,
    O: Overlay,
    C: Clipboard,
    N: Notifier,
{
    /// Create a new use case instance
    pub fn new(screen: S, overlay: O, clipboard: C, notifier: N) -> Self {
        Self {
            screen,
            overlay,
            clipboard,
            notifier,
            cancel_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the cancel flag for external signal handling
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel_flag)
    }

    /// Ask the running session to cancel at its next tick
    pub fn request_cancel(&self) {
        self.cancel_flag.store(true, Ordering::SeqCst);
    }

    /// Run the session to completion
    pub async fn execute(
        &mut self,
        input: PickInput,
        callbacks: PickCallbacks,
    ) -> Result<PickOutcome, PickError> {
        let mut session = PickerSession::new();
        session.begin()?;

        let mut last_cursor = self.tick(&mut session, &input, &callbacks, None)?;

        let mut ticker = tokio::time::interval(input.interval.as_std());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick of a tokio interval completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            if self.cancel_flag.load(Ordering::SeqCst) {
                session.cancel()?;
                self.close_overlay(&callbacks);
                return Ok(PickOutcome::Cancelled);
            }

            // Input first, so a commit takes the color currently on display
            for event in self.overlay.poll_input()? {
                match event {
                    InputEvent::Cancel => {
                        session.cancel()?;
                        self.close_overlay(&callbacks);
                        return Ok(PickOutcome::Cancelled);
                    }
                    InputEvent::Commit => match session.commit() {
                        Ok(color) => {
                            return self.commit(color, &input, &callbacks, last_cursor).await;
                        }
                        Err(SessionError::NothingSampled) => {
                            callbacks.warning("Nothing sampled yet, ignoring click");
                        }
                        Err(e) => return Err(e.into()),
                    },
                }
            }

            last_cursor = self.tick(&mut session, &input, &callbacks, last_cursor)?;
        }
    }

    /// Sample under the cursor and redraw the tooltip.
    /// Returns the cursor position the tooltip is now anchored to.
    fn tick(
        &mut self,
        session: &mut PickerSession,
        input: &PickInput,
        callbacks: &PickCallbacks,
        last_cursor: Option<Point>,
    ) -> Result<Option<Point>, PickError> {
        let cursor = match self.screen.cursor_position() {
            Ok(cursor) => cursor,
            Err(e) => {
                callbacks.sample_error(&e);
                return Ok(last_cursor);
            }
        };

        match self.screen.sample(cursor) {
            Ok(color) => session.update(color)?,
            Err(e) => callbacks.sample_error(&e),
        }

        let label = session
            .current()
            .map(TooltipLabel::for_color)
            .unwrap_or_else(TooltipLabel::placeholder);
        self.show_near(&label, cursor, input.offset)?;

        Ok(Some(cursor))
    }

    async fn commit(
        &mut self,
        color: SampledColor,
        input: &PickInput,
        callbacks: &PickCallbacks,
        last_cursor: Option<Point>,
    ) -> Result<PickOutcome, PickError> {
        let text = input.format.format(color);

        match self.clipboard.copy(&text).await {
            Ok(()) => {
                self.close_overlay(callbacks);

                if input.notify_on_copy {
                    if let Err(e) = self
                        .notifier
                        .notify(
                            NOTIFICATION_TITLE,
                            &format!("Copied {}", text),
                            NotificationIcon::Success,
                        )
                        .await
                    {
                        callbacks.warning(&format!("Notification failed: {}", e));
                    }
                }

                Ok(PickOutcome::Copied { color, text })
            }
            Err(error) => {
                if let Some(cursor) = last_cursor {
                    self.show_near(&TooltipLabel::copy_failed(color), cursor, input.offset)?;
                }

                if let Err(e) = self
                    .notifier
                    .notify(
                        NOTIFICATION_TITLE,
                        &format!("Could not copy {}: {}", text, error),
                        NotificationIcon::Error,
                    )
                    .await
                {
                    callbacks.warning(&format!("Notification failed: {}", e));
                }

                tokio::time::sleep(input.failure_linger).await;
                self.close_overlay(callbacks);

                Ok(PickOutcome::CopyFailed { color, text, error })
            }
        }
    }

    fn show_near(
        &mut self,
        label: &TooltipLabel,
        cursor: Point,
        offset: Offset,
    ) -> Result<(), PickError> {
        let size = self.overlay.measure(label);
        let origin = place_tooltip(cursor, size, self.screen.screen_size(), offset);
        self.overlay.show(label, origin)?;
        Ok(())
    }

    /// The outcome is already decided here, so a failing close is only reported
    fn close_overlay(&mut self, callbacks: &PickCallbacks) {
        if let Err(e) = self.overlay.close() {
            callbacks.warning(&format!("Failed to close tooltip: {}", e));
        }
    }
}
