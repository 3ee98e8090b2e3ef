//! Cross-platform clipboard adapter using arboard
//!
//! Works on Windows, macOS, and Linux (X11/Wayland).
//!
//! On X11 and Wayland the clipboard is served by its owner, so the contents
//! vanish when colorgrab exits. There the text is handed to a detached copy of
//! colorgrab (`colorgrab hold-clipboard`) that owns the selection until
//! another program replaces it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::application::ports::{Clipboard, ClipboardError};

/// Hidden subcommand run by the detached selection holder
pub const HOLD_SUBCOMMAND: &str = "hold-clipboard";

/// Cross-platform clipboard adapter using arboard
pub struct ArboardClipboard {
    /// Executable started as selection holder, if the platform needs one
    holder: Option<PathBuf>,
}

impl ArboardClipboard {
    /// Create a new arboard clipboard adapter
    pub fn new() -> Self {
        #[cfg(all(unix, not(target_os = "macos")))]
        let holder = std::env::current_exe().ok();
        #[cfg(not(all(unix, not(target_os = "macos"))))]
        let holder = None;

        Self { holder }
    }

    /// Create an adapter that sets the clipboard from this process only
    pub fn in_process() -> Self {
        Self { holder: None }
    }

    /// Executable that keeps the selection alive after we exit
    pub fn holder(&self) -> Option<&Path> {
        self.holder.as_deref()
    }
}

impl Default for ArboardClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clipboard for ArboardClipboard {
    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        #[cfg(all(unix, not(target_os = "macos")))]
        if let Some(exe) = &self.holder {
            return holder::hand_off(exe, text).await;
        }

        let text = text.to_owned();

        // arboard operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::ClipboardUnavailable(e.to_string()))?;
            clipboard
                .set_text(text)
                .map_err(|e| ClipboardError::CopyFailed(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::CopyFailed(format!("Task join error: {}", e)))?
    }

    fn name(&self) -> &'static str {
        "arboard"
    }
}

/// Set the clipboard and block until another program takes it over.
///
/// Runs inside the holder process. Returns once the selection is lost.
pub fn hold_selection(text: String) -> Result<(), ClipboardError> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| ClipboardError::ClipboardUnavailable(e.to_string()))?;

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        use arboard::SetExtLinux;
        clipboard
            .set()
            .wait()
            .text(text)
            .map_err(|e| ClipboardError::CopyFailed(e.to_string()))
    }

    #[cfg(not(all(unix, not(target_os = "macos"))))]
    {
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::CopyFailed(e.to_string()))
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
mod holder {
    use std::path::Path;
    use std::process::Stdio;
    use std::time::Duration;

    use tokio::io::AsyncWriteExt;
    use tokio::process::Command;

    use super::HOLD_SUBCOMMAND;
    use crate::application::ports::ClipboardError;

    /// How long a failing holder gets to report its error. A holder still
    /// running after this owns the selection.
    const STARTUP_WINDOW: Duration = Duration::from_millis(300);

    pub(super) fn command(exe: &Path) -> Command {
        let mut cmd = Command::new(exe);
        cmd.arg(HOLD_SUBCOMMAND)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            // Own process group, so Ctrl+C in the terminal does not reach it
            .process_group(0);
        cmd
    }

    pub(super) async fn hand_off(exe: &Path, text: &str) -> Result<(), ClipboardError> {
        let mut child = command(exe)
            .spawn()
            .map_err(|e| ClipboardError::ClipboardUnavailable(e.to_string()))?;

        // Write text to stdin, then close it so the holder sees EOF
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| ClipboardError::CopyFailed(e.to_string()))?;
        }

        match tokio::time::timeout(STARTUP_WINDOW, child.wait()).await {
            Err(_) => Ok(()),
            Ok(Ok(status)) if status.success() => Ok(()),
            Ok(Ok(status)) => Err(ClipboardError::CopyFailed(format!(
                "clipboard holder exited with status: {}",
                status
            ))),
            Ok(Err(e)) => Err(ClipboardError::CopyFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipboard_default_creates() {
        let clipboard = ArboardClipboard::default();
        assert_eq!(clipboard.name(), "arboard");
    }

    #[test]
    fn in_process_has_no_holder() {
        assert!(ArboardClipboard::in_process().holder().is_none());
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn default_hands_selection_to_detached_holder() {
        let clipboard = ArboardClipboard::new();
        let exe = std::env::current_exe().unwrap();
        assert_eq!(clipboard.holder(), Some(exe.as_path()));
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn holder_runs_hidden_subcommand() {
        let cmd = holder::command(Path::new("/usr/bin/colorgrab"));
        let std_cmd = cmd.as_std();
        assert_eq!(std_cmd.get_program(), "/usr/bin/colorgrab");
        let args: Vec<_> = std_cmd.get_args().collect();
        assert_eq!(args, vec![HOLD_SUBCOMMAND]);
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[tokio::test]
    async fn failing_holder_is_reported() {
        // `false` exits non-zero straight away
        let result = holder::hand_off(Path::new("false"), "#FF0000").await;
        assert!(matches!(result, Err(ClipboardError::CopyFailed(_))));
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[tokio::test]
    async fn missing_holder_is_unavailable() {
        let result = holder::hand_off(Path::new("/nonexistent/colorgrab"), "#FF0000").await;
        assert!(matches!(
            result,
            Err(ClipboardError::ClipboardUnavailable(_))
        ));
    }
}
