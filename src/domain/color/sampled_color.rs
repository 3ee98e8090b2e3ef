//! Sampled color value object

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::error::ColorParseError;

/// Luminance above which dark text reads better than light text
const DARK_TEXT_THRESHOLD: f64 = 0.6;

/// Color of a single screen pixel.
/// Channels are 8-bit, so every value is within [0, 255] by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SampledColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl SampledColor {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from its channels
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Channels as an array in RGB order
    pub const fn channels(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Hexadecimal form, e.g. "#FF0080"
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Decimal form, e.g. "255,0,128"
    pub fn to_rgb_string(&self) -> String {
        format!("{},{},{}", self.red, self.green, self.blue)
    }

    /// Relative luminance in [0, 1] using Rec. 709 weights on the raw channels
    pub fn luminance(&self) -> f64 {
        let r = self.red as f64 / 255.0;
        let g = self.green as f64 / 255.0;
        let b = self.blue as f64 / 255.0;
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// Whether black text is more legible than white text on this color
    pub fn prefers_dark_text(&self) -> bool {
        self.luminance() > DARK_TEXT_THRESHOLD
    }

    /// Black or white, whichever reads better on top of this color
    pub fn contrast_color(&self) -> Self {
        if self.prefers_dark_text() {
            Self::BLACK
        } else {
            Self::WHITE
        }
    }

    /// Parse "#RRGGBB", "RRGGBB" or the "#RGB" shorthand
    pub fn parse_hex(input: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError {
            input: input.to_string(),
        };

        let digits = input.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        match digits.len() {
            6 => {
                let channel =
                    |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| err());
                Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                // #RGB expands each nibble: F -> FF
                let channel = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .map(|n| n * 17)
                        .map_err(|_| err())
                };
                Ok(Self::new(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => Err(err()),
        }
    }

    /// Parse "R,G,B", "R, G, B" or "rgb(R, G, B)"
    pub fn parse_rgb(input: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError {
            input: input.to_string(),
        };

        let body = input.trim();
        let lower = body.to_ascii_lowercase();
        let body = if lower.starts_with("rgb(") && lower.ends_with(')') {
            &body[4..body.len() - 1]
        } else {
            body
        };

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(err());
        }

        let channel = |s: &str| s.parse::<u8>().map_err(|_| err());
        Ok(Self::new(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
        ))
    }
}

impl FromStr for SampledColor {
    type Err = ColorParseError;

    /// Accepts any supported notation, hex or decimal
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(',') {
            Self::parse_rgb(s)
        } else {
            Self::parse_hex(s)
        }
    }
}

impl fmt::Display for SampledColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<(u8, u8, u8)> for SampledColor {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_hex_is_uppercase_with_hash() {
        assert_eq!(SampledColor::new(255, 0, 128).to_hex(), "#FF0080");
        assert_eq!(SampledColor::BLACK.to_hex(), "#000000");
    }

    #[test]
    fn to_rgb_string_is_comma_separated() {
        assert_eq!(SampledColor::new(255, 0, 128).to_rgb_string(), "255,0,128");
    }

    #[test]
    fn hex_round_trip() {
        let color = SampledColor::new(255, 0, 128);
        let parsed: SampledColor = color.to_hex().parse().unwrap();
        assert_eq!(parsed, color);
    }

    #[test]
    fn parse_hex_variants() {
        let expected = SampledColor::new(0xAB, 0xCD, 0xEF);
        assert_eq!(SampledColor::parse_hex("#ABCDEF").unwrap(), expected);
        assert_eq!(SampledColor::parse_hex("abcdef").unwrap(), expected);
        assert_eq!(SampledColor::parse_hex("  #abcdef ").unwrap(), expected);
    }

    #[test]
    fn parse_hex_shorthand() {
        assert_eq!(
            SampledColor::parse_hex("#F08").unwrap(),
            SampledColor::new(255, 0, 136)
        );
    }

    #[test]
    fn parse_hex_rejects_garbage() {
        assert!(SampledColor::parse_hex("#GG0000").is_err());
        assert!(SampledColor::parse_hex("#FF00").is_err());
        assert!(SampledColor::parse_hex("").is_err());
        assert!(SampledColor::parse_hex("#+F0000").is_err());
    }

    #[test]
    fn parse_rgb_variants() {
        let expected = SampledColor::new(255, 0, 128);
        assert_eq!(SampledColor::parse_rgb("255,0,128").unwrap(), expected);
        assert_eq!(SampledColor::parse_rgb("255, 0, 128").unwrap(), expected);
        assert_eq!(SampledColor::parse_rgb("rgb(255, 0, 128)").unwrap(), expected);
        assert_eq!(SampledColor::parse_rgb("RGB(255,0,128)").unwrap(), expected);
    }

    #[test]
    fn parse_rgb_rejects_out_of_range() {
        assert!(SampledColor::parse_rgb("256,0,0").is_err());
        assert!(SampledColor::parse_rgb("-1,0,0").is_err());
        assert!(SampledColor::parse_rgb("1,2").is_err());
        assert!(SampledColor::parse_rgb("1,2,3,4").is_err());
    }

    #[test]
    fn from_str_dispatches_on_notation() {
        assert_eq!(
            "#FF0000".parse::<SampledColor>().unwrap(),
            SampledColor::new(255, 0, 0)
        );
        assert_eq!(
            "0,255,0".parse::<SampledColor>().unwrap(),
            SampledColor::new(0, 255, 0)
        );
    }

    #[test]
    fn luminance_bounds() {
        assert!(SampledColor::BLACK.luminance().abs() < 1e-9);
        assert!((SampledColor::WHITE.luminance() - 1.0).abs() < 1e-9);
        assert!((SampledColor::new(0, 255, 0).luminance() - 0.7152).abs() < 1e-9);
    }

    #[test]
    fn contrast_color_picks_readable_text() {
        assert_eq!(SampledColor::WHITE.contrast_color(), SampledColor::BLACK);
        assert_eq!(SampledColor::BLACK.contrast_color(), SampledColor::WHITE);
        // Pure red is dark enough for white text
        assert_eq!(
            SampledColor::new(255, 0, 0).contrast_color(),
            SampledColor::WHITE
        );
        // Bright yellow needs black text
        assert_eq!(
            SampledColor::new(255, 255, 0).contrast_color(),
            SampledColor::BLACK
        );
    }

    #[test]
    fn error_message_contains_input() {
        let err = SampledColor::parse_hex("nope").unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
