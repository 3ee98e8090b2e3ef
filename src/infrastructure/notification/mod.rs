//! Notification infrastructure module
//!
//! Provides cross-platform notification support using notify-rust (primary)
//! or the notify-send command as fallback.

mod noop;
mod notify_rust;
mod notify_send;

pub use noop::NoOpNotifier;
pub use notify_rust::NotifyRustNotifier;
pub use notify_send::NotifySendNotifier;

use std::fmt;
use std::str::FromStr;

use crate::application::ports::Notifier;

/// Application name shown by the notification daemon
pub(crate) const APP_NAME: &str = "colorgrab";

/// Accepted values for `linux.notifier`
pub const VALID_NOTIFIERS: &[&str] = &["notify-rust", "notify-send", "none"];

/// User preference for the notification backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifierKind {
    #[default]
    NotifyRust,
    NotifySend,
    None,
}

impl fmt::Display for NotifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifierKind::NotifyRust => write!(f, "notify-rust"),
            NotifierKind::NotifySend => write!(f, "notify-send"),
            NotifierKind::None => write!(f, "none"),
        }
    }
}

/// Error type for parsing notifier preference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNotifierError {
    pub value: String,
}

impl fmt::Display for ParseNotifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid notifier '{}'. Valid options: {}",
            self.value,
            VALID_NOTIFIERS.join(", ")
        )
    }
}

impl std::error::Error for ParseNotifierError {}

impl FromStr for NotifierKind {
    type Err = ParseNotifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "notify-rust" => Ok(NotifierKind::NotifyRust),
            "notify-send" => Ok(NotifierKind::NotifySend),
            "none" => Ok(NotifierKind::None),
            _ => Err(ParseNotifierError {
                value: s.to_string(),
            }),
        }
    }
}

/// Create the notifier for the given preference
pub fn create_notifier(kind: NotifierKind) -> Box<dyn Notifier> {
    match kind {
        NotifierKind::NotifyRust => Box::new(NotifyRustNotifier::new()),
        NotifierKind::NotifySend => Box::new(NotifySendNotifier::new()),
        NotifierKind::None => Box::new(NoOpNotifier::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::NotificationIcon;

    #[test]
    fn notifier_kind_from_str() {
        assert_eq!(
            "notify-send".parse::<NotifierKind>().unwrap(),
            NotifierKind::NotifySend
        );
        assert_eq!("NONE".parse::<NotifierKind>().unwrap(), NotifierKind::None);
        assert!("dunst".parse::<NotifierKind>().is_err());
    }

    #[test]
    fn every_valid_notifier_parses_and_displays_back() {
        for name in VALID_NOTIFIERS {
            let kind: NotifierKind = name.parse().unwrap();
            assert_eq!(kind.to_string(), *name);
        }
    }

    #[tokio::test]
    async fn noop_notifier_always_succeeds() {
        let notifier = create_notifier(NotifierKind::None);
        notifier
            .notify("colorgrab", "Copied", NotificationIcon::Success)
            .await
            .unwrap();
    }
}
