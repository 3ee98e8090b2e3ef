//! Clipboard adapter that pipes the text into an external tool

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::ports::{Clipboard, ClipboardError};

/// External clipboard programs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardCommand {
    /// Wayland: wl-copy
    WlCopy,
    /// X11: xclip -selection clipboard
    Xclip,
    /// X11: xsel -bi
    Xsel,
}

impl ClipboardCommand {
    /// Binary name
    pub const fn program(&self) -> &'static str {
        match self {
            Self::WlCopy => "wl-copy",
            Self::Xclip => "xclip",
            Self::Xsel => "xsel",
        }
    }

    /// Arguments that make the program read the clipboard text from stdin
    pub const fn args(&self) -> &'static [&'static str] {
        match self {
            Self::WlCopy => &[],
            Self::Xclip => &["-selection", "clipboard"],
            Self::Xsel => &["-bi"],
        }
    }
}

/// Clipboard adapter backed by a [`ClipboardCommand`]
pub struct CommandClipboard {
    command: ClipboardCommand,
}

impl CommandClipboard {
    /// Create an adapter for `command`
    pub fn new(command: ClipboardCommand) -> Self {
        Self { command }
    }

    /// The program this adapter runs
    pub fn command(&self) -> ClipboardCommand {
        self.command
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let program = self.command.program();

        let mut child = Command::new(program)
            .args(self.command.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ClipboardError::ToolNotFound(program.to_string())
                } else {
                    ClipboardError::CopyFailed(e.to_string())
                }
            })?;

        // Write text to stdin, then close it so the tool sees EOF
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| ClipboardError::CopyFailed(e.to_string()))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| ClipboardError::CopyFailed(e.to_string()))?;

        if !status.success() {
            return Err(ClipboardError::CopyFailed(format!(
                "{} exited with status: {}",
                program, status
            )));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        self.command.program()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_lines() {
        assert_eq!(ClipboardCommand::WlCopy.program(), "wl-copy");
        assert!(ClipboardCommand::WlCopy.args().is_empty());
        assert_eq!(
            ClipboardCommand::Xclip.args(),
            &["-selection", "clipboard"]
        );
        assert_eq!(ClipboardCommand::Xsel.args(), &["-bi"]);
    }

    #[test]
    fn name_is_program() {
        let clipboard = CommandClipboard::new(ClipboardCommand::Xsel);
        assert_eq!(clipboard.name(), "xsel");
        assert_eq!(clipboard.command(), ClipboardCommand::Xsel);
    }
}
