//! CLI argument definitions using Clap

use std::path::PathBuf;
use std::time::Duration as StdDuration;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::color::ColorFormat;
use crate::domain::picker::{Offset, PollInterval};
use crate::infrastructure::{ClipboardTool, NotifierKind};

/// colorgrab - pick a color from anywhere on screen
#[derive(Parser, Debug)]
#[command(name = "colorgrab")]
#[command(version)]
#[command(about = "Pick a pixel color from anywhere on screen and copy it to the clipboard")]
#[command(
    long_about = "Shows the color under the cursor in a small tooltip that follows the mouse.\n\
                  Left click or Enter copies it, Escape or right click cancels."
)]
pub struct Cli {
    /// Clipboard text format
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<FormatArg>,

    /// Sampling interval (e.g., 40, 40ms, 1s)
    #[arg(short = 'i', long, value_name = "TIME")]
    pub interval: Option<String>,

    /// Tooltip offset from the cursor in pixels
    #[arg(long, value_name = "X,Y", allow_hyphen_values = true)]
    pub offset: Option<String>,

    /// Show a desktop notification after copying
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// TrueType font for the tooltip text
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Print the picked color as JSON
    #[arg(long)]
    pub json: bool,

    /// Log sampling problems and backend choices to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Own the clipboard selection until another program replaces it
    #[command(name = "hold-clipboard", hide = true)]
    HoldClipboard,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Format argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// #RRGGBB
    Hex,
    /// R,G,B
    Rgb,
}

impl From<FormatArg> for ColorFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Hex => ColorFormat::Hex,
            FormatArg::Rgb => ColorFormat::Rgb,
        }
    }
}

/// Parsed pick options
#[derive(Debug, Clone)]
pub struct PickOptions {
    pub format: ColorFormat,
    pub interval: PollInterval,
    pub offset: Offset,
    pub notify: bool,
    pub failure_linger: StdDuration,
    pub font: Option<PathBuf>,
    pub clipboard_tool: ClipboardTool,
    pub notifier: NotifierKind,
    pub json: bool,
    pub verbose: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "format",
    "interval",
    "offset",
    "notify",
    "failure_linger",
    "font",
    "linux.clipboard_tool",
    "linux.notifier",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["colorgrab"]);
        assert!(cli.format.is_none());
        assert!(cli.interval.is_none());
        assert!(cli.offset.is_none());
        assert!(cli.font.is_none());
        assert!(!cli.notify);
        assert!(!cli.json);
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_format() {
        let cli = Cli::parse_from(["colorgrab", "-f", "rgb"]);
        assert_eq!(cli.format, Some(FormatArg::Rgb));
        assert_eq!(ColorFormat::from(FormatArg::Rgb), ColorFormat::Rgb);
    }

    #[test]
    fn cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["colorgrab", "--format", "hsl"]).is_err());
    }

    #[test]
    fn cli_parses_negative_offset() {
        let cli = Cli::parse_from(["colorgrab", "--offset", "-20,10"]);
        assert_eq!(cli.offset, Some("-20,10".to_string()));
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from(["colorgrab", "-n", "-v", "--json", "-i", "25ms"]);
        assert!(cli.notify);
        assert!(cli.verbose);
        assert!(cli.json);
        assert_eq!(cli.interval, Some("25ms".to_string()));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["colorgrab", "config", "set", "format", "rgb"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "format");
            assert_eq!(value, "rgb");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn cli_parses_hidden_holder() {
        use crate::infrastructure::clipboard::HOLD_SUBCOMMAND;

        let cli = Cli::parse_from(["colorgrab", HOLD_SUBCOMMAND]);
        assert!(matches!(cli.command, Some(Commands::HoldClipboard)));
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("format"));
        assert!(is_valid_config_key("failure_linger"));
        assert!(is_valid_config_key("linux.clipboard_tool"));
        assert!(!is_valid_config_key("failure_linger_ms"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
