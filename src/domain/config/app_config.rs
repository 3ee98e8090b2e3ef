//! Application configuration value object

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use serde::{Deserialize, Serialize};

use crate::domain::color::ColorFormat;
use crate::domain::error::{InvalidFormatError, IntervalParseError, OffsetParseError};
use crate::domain::picker::{Offset, PollInterval};

/// How long the failure label stays up when no value is configured
pub const DEFAULT_FAILURE_LINGER_MS: u64 = 1500;

/// Linux-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinuxConfig {
    pub clipboard_tool: Option<String>,
    pub notifier: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub format: Option<String>,
    pub interval: Option<String>,
    pub offset: Option<String>,
    pub notify: Option<bool>,
    #[serde(rename = "failure_linger")]
    pub failure_linger_ms: Option<u64>,
    pub font: Option<String>,
    pub linux: Option<LinuxConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            format: Some(ColorFormat::default().to_string()),
            interval: Some(PollInterval::default().to_string()),
            offset: Some(Offset::default().to_string()),
            notify: Some(false),
            failure_linger_ms: Some(DEFAULT_FAILURE_LINGER_MS),
            font: None,
            linux: Some(LinuxConfig {
                clipboard_tool: Some("arboard".to_string()),
                notifier: Some("notify-rust".to_string()),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            format: other.format.or(self.format),
            interval: other.interval.or(self.interval),
            offset: other.offset.or(self.offset),
            notify: other.notify.or(self.notify),
            failure_linger_ms: other.failure_linger_ms.or(self.failure_linger_ms),
            font: other.font.or(self.font),
            linux: Self::merge_linux_config(self.linux, other.linux),
        }
    }

    /// Merge Linux config sections
    fn merge_linux_config(
        base: Option<LinuxConfig>,
        other: Option<LinuxConfig>,
    ) -> Option<LinuxConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(LinuxConfig {
                clipboard_tool: o.clipboard_tool.or(b.clipboard_tool),
                notifier: o.notifier.or(b.notifier),
            }),
        }
    }

    /// Configured format, or the default when unset
    pub fn parse_format(&self) -> Result<ColorFormat, InvalidFormatError> {
        parse_or_default(self.format.as_deref())
    }

    /// Configured interval, or the default when unset
    pub fn parse_interval(&self) -> Result<PollInterval, IntervalParseError> {
        parse_or_default(self.interval.as_deref())
    }

    /// Configured offset, or the default when unset
    pub fn parse_offset(&self) -> Result<Offset, OffsetParseError> {
        parse_or_default(self.offset.as_deref())
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// How long the failure label stays visible
    pub fn failure_linger_or_default(&self) -> StdDuration {
        StdDuration::from_millis(self.failure_linger_ms.unwrap_or(DEFAULT_FAILURE_LINGER_MS))
    }

    /// Configured font file, if any
    pub fn font_path(&self) -> Option<PathBuf> {
        self.font
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
    }

    /// Get clipboard tool preference, or "arboard" if not set
    pub fn clipboard_tool_or_default(&self) -> &str {
        self.linux
            .as_ref()
            .and_then(|l| l.clipboard_tool.as_deref())
            .unwrap_or("arboard")
    }

    /// Get notifier preference, or "notify-rust" if not set
    pub fn notifier_or_default(&self) -> &str {
        self.linux
            .as_ref()
            .and_then(|l| l.notifier.as_deref())
            .unwrap_or("notify-rust")
    }
}

fn parse_or_default<T: FromStr + Default>(value: Option<&str>) -> Result<T, T::Err> {
    value
        .map(str::parse::<T>)
        .transpose()
        .map(Option::unwrap_or_default)
}
