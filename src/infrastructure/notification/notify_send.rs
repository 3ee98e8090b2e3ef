//! notify-send notification adapter

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};

use super::APP_NAME;

/// notify-send notification adapter
pub struct NotifySendNotifier {
    /// Application name for notifications
    app_name: String,
}

impl NotifySendNotifier {
    /// Create a new notify-send notifier
    pub fn new() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
        }
    }

    fn args<'a>(
        &'a self,
        title: &'a str,
        message: &'a str,
        icon: NotificationIcon,
    ) -> [&'a str; 6] {
        [
            "--app-name",
            &self.app_name,
            "--icon",
            icon.icon_name(),
            title,
            message,
        ]
    }
}

impl Default for NotifySendNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NotifySendNotifier {
    async fn notify(
        &self,
        title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        let status = Command::new("notify-send")
            .args(self.args(title, message, icon))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    NotificationError::NotifySendNotFound
                } else {
                    NotificationError::SendFailed(e.to_string())
                }
            })?;

        if !status.success() {
            return Err(NotificationError::SendFailed(format!(
                "notify-send exited with status: {}",
                status
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_carries_app_name_and_icon() {
        let notifier = NotifySendNotifier::new();
        let args = notifier.args("colorgrab", "Copied #FF0000", NotificationIcon::Success);
        assert_eq!(
            args,
            [
                "--app-name",
                "colorgrab",
                "--icon",
                "dialog-ok",
                "colorgrab",
                "Copied #FF0000"
            ]
        );
    }
}
