//! Clipboard infrastructure module
//!
//! Provides cross-platform clipboard support using arboard (primary)
//! or an external clipboard program as fallback. Both keep the text
//! available after colorgrab exits.

mod arboard;
mod command;

pub use arboard::{hold_selection, ArboardClipboard, HOLD_SUBCOMMAND};
pub use command::{ClipboardCommand, CommandClipboard};

use std::fmt;
use std::str::FromStr;

use crate::application::ports::Clipboard;

/// User preference for the clipboard backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardTool {
    /// arboard library (default)
    #[default]
    Arboard,
    /// An external program
    Command(ClipboardCommand),
}

/// Accepted values for `linux.clipboard_tool`
pub const VALID_CLIPBOARD_TOOLS: &[&str] = &["arboard", "wl-copy", "xclip", "xsel"];

impl fmt::Display for ClipboardTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardTool::Arboard => write!(f, "arboard"),
            ClipboardTool::Command(command) => write!(f, "{}", command.program()),
        }
    }
}

/// Error type for parsing clipboard tool preference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseClipboardToolError {
    pub value: String,
}

impl fmt::Display for ParseClipboardToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid clipboard tool '{}'. Valid options: {}",
            self.value,
            VALID_CLIPBOARD_TOOLS.join(", ")
        )
    }
}

impl std::error::Error for ParseClipboardToolError {}

impl FromStr for ClipboardTool {
    type Err = ParseClipboardToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arboard" => Ok(ClipboardTool::Arboard),
            "wl-copy" => Ok(ClipboardTool::Command(ClipboardCommand::WlCopy)),
            "xclip" => Ok(ClipboardTool::Command(ClipboardCommand::Xclip)),
            "xsel" => Ok(ClipboardTool::Command(ClipboardCommand::Xsel)),
            _ => Err(ParseClipboardToolError {
                value: s.to_string(),
            }),
        }
    }
}

/// Create the clipboard adapter for the given preference
pub fn create_clipboard(tool: ClipboardTool) -> Box<dyn Clipboard> {
    match tool {
        ClipboardTool::Arboard => Box::new(ArboardClipboard::new()),
        ClipboardTool::Command(command) => Box::new(CommandClipboard::new(command)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipboard_tool_from_str() {
        assert_eq!("arboard".parse::<ClipboardTool>().unwrap(), ClipboardTool::Arboard);
        assert_eq!(
            "XCLIP".parse::<ClipboardTool>().unwrap(),
            ClipboardTool::Command(ClipboardCommand::Xclip)
        );
        assert_eq!(
            "wl-copy".parse::<ClipboardTool>().unwrap(),
            ClipboardTool::Command(ClipboardCommand::WlCopy)
        );
    }

    #[test]
    fn clipboard_tool_from_str_invalid() {
        let err = "pbcopy".parse::<ClipboardTool>().unwrap_err();
        assert_eq!(err.value, "pbcopy");
        assert!(err.to_string().contains("xsel"));
    }

    #[test]
    fn every_valid_tool_parses_and_displays_back() {
        for name in VALID_CLIPBOARD_TOOLS {
            let tool: ClipboardTool = name.parse().unwrap();
            assert_eq!(tool.to_string(), *name);
        }
    }

    #[test]
    fn factory_picks_adapter() {
        assert_eq!(create_clipboard(ClipboardTool::Arboard).name(), "arboard");
        assert_eq!(
            create_clipboard(ClipboardTool::Command(ClipboardCommand::WlCopy)).name(),
            "wl-copy"
        );
    }
}
