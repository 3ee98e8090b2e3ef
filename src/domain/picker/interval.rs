//! Poll interval value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::IntervalParseError;

/// Default tick period in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 40;

/// Shortest accepted tick period
pub const MIN_INTERVAL_MS: u64 = 10;

/// Longest accepted tick period
pub const MAX_INTERVAL_MS: u64 = 1000;

/// Period between two sampling ticks.
/// Immutable and validated on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PollInterval {
    milliseconds: u64,
}

impl PollInterval {
    /// Create an interval, rejecting values outside the accepted range
    pub fn from_millis(ms: u64) -> Result<Self, IntervalParseError> {
        if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&ms) {
            return Err(Self::error(&ms.to_string()));
        }
        Ok(Self { milliseconds: ms })
    }

    /// Get the interval in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }

    fn error(input: &str) -> IntervalParseError {
        IntervalParseError {
            input: input.to_string(),
            min: MIN_INTERVAL_MS,
            max: MAX_INTERVAL_MS,
        }
    }
}

impl Default for PollInterval {
    fn default() -> Self {
        Self {
            milliseconds: DEFAULT_INTERVAL_MS,
        }
    }
}

impl FromStr for PollInterval {
    type Err = IntervalParseError;

    /// Supported formats: "40", "40ms", "1s"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();

        let (digits, scale) = if let Some(ms) = input.strip_suffix("ms") {
            (ms, 1)
        } else if let Some(secs) = input.strip_suffix('s') {
            (secs, 1000)
        } else {
            (input.as_str(), 1)
        };

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(Self::error(s));
        }

        let value: u64 = digits.parse().map_err(|_| Self::error(s))?;
        let ms = value.checked_mul(scale).ok_or_else(|| Self::error(s))?;

        Self::from_millis(ms).map_err(|_| Self::error(s))
    }
}

impl fmt::Display for PollInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.milliseconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_forty_millis() {
        assert_eq!(PollInterval::default().as_millis(), 40);
    }

    #[test]
    fn parse_plain_number() {
        assert_eq!("50".parse::<PollInterval>().unwrap().as_millis(), 50);
    }

    #[test]
    fn parse_with_units() {
        assert_eq!("100ms".parse::<PollInterval>().unwrap().as_millis(), 100);
        assert_eq!("1s".parse::<PollInterval>().unwrap().as_millis(), 1000);
        assert_eq!(" 25MS ".parse::<PollInterval>().unwrap().as_millis(), 25);
    }

    #[test]
    fn parse_rejects_out_of_range() {
        assert!("5".parse::<PollInterval>().is_err());
        assert!("2s".parse::<PollInterval>().is_err());
        assert!("0".parse::<PollInterval>().is_err());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<PollInterval>().is_err());
        assert!("ms".parse::<PollInterval>().is_err());
        assert!("fast".parse::<PollInterval>().is_err());
        assert!("-40".parse::<PollInterval>().is_err());
        assert!("4.5ms".parse::<PollInterval>().is_err());
    }

    #[test]
    fn error_keeps_original_input() {
        let err = "2s".parse::<PollInterval>().unwrap_err();
        assert_eq!(err.input, "2s");
        assert!(err.to_string().contains("between 10 and 1000"));
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(PollInterval::from_millis(MIN_INTERVAL_MS).is_ok());
        assert!(PollInterval::from_millis(MAX_INTERVAL_MS).is_ok());
    }

    #[test]
    fn display_and_std_conversion() {
        let interval = PollInterval::from_millis(40).unwrap();
        assert_eq!(interval.to_string(), "40ms");
        assert_eq!(interval.as_std(), StdDuration::from_millis(40));
    }
}
