//! Domain error types

use thiserror::Error;

/// Error when a color string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid color: \"{input}\". Expected #RRGGBB, #RGB or R,G,B (e.g., #FF0080, 255,0,128)")]
pub struct ColorParseError {
    pub input: String,
}

/// Error when an unknown color format is requested
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid format: \"{input}\". Valid formats are: hex, rgb")]
pub struct InvalidFormatError {
    pub input: String,
}

/// Error when parsing a poll interval string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid interval: \"{input}\". Expected milliseconds between {min} and {max} (e.g., 40, 40ms, 1s)")]
pub struct IntervalParseError {
    pub input: String,
    pub min: u64,
    pub max: u64,
}

/// Error when parsing a tooltip offset string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid offset: \"{input}\". Expected X,Y in pixels between -4096 and 4096 (e.g., 16,16)")]
pub struct OffsetParseError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
