//! Clipboard text format for a sampled color

use std::fmt;
use std::str::FromStr;

use crate::domain::color::SampledColor;
use crate::domain::error::{ColorParseError, InvalidFormatError};

/// All available color formats
pub const ALL_FORMATS: &[ColorFormat] = &[ColorFormat::Hex, ColorFormat::Rgb];

/// How a committed color is written to the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorFormat {
    /// "#RRGGBB"
    #[default]
    Hex,
    /// "R,G,B"
    Rgb,
}

impl ColorFormat {
    /// Get the string identifier for this format
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Rgb => "rgb",
        }
    }

    /// Render a color in this format
    pub fn format(&self, color: SampledColor) -> String {
        match self {
            Self::Hex => color.to_hex(),
            Self::Rgb => color.to_rgb_string(),
        }
    }

    /// Parse text produced by [`ColorFormat::format`] back into a color
    pub fn parse(&self, text: &str) -> Result<SampledColor, ColorParseError> {
        match self {
            Self::Hex => SampledColor::parse_hex(text),
            Self::Rgb => SampledColor::parse_rgb(text),
        }
    }
}

impl FromStr for ColorFormat {
    type Err = InvalidFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "rgb" => Ok(Self::Rgb),
            _ => Err(InvalidFormatError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
