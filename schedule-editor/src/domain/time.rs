//! Schedule time handling.
//!
//! Schedule data expresses times as seconds past midnight on the service
//! date. Overnight runs carry on past 24:00:00, so an hour value above 23
//! is legal and common ("25:30:00" is half past one the following morning,
//! still on the previous service date).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeParseError {
    reason: &'static str,
}

impl TimeParseError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day on a service date, as seconds past midnight.
///
/// Values at or beyond 24:00:00 are legal and represent times on the
/// following calendar day that still belong to the original service date.
///
/// # Examples
///
/// ```
/// use schedule_editor::domain::ScheduleTime;
///
/// let t = ScheduleTime::parse("08:15:30").unwrap();
/// assert_eq!(t.seconds(), 8 * 3600 + 15 * 60 + 30);
/// assert_eq!(t.to_string(), "08:15:30");
///
/// // Overnight times are fine
/// assert!(ScheduleTime::parse("25:30:00").is_ok());
///
/// // Malformed times are not
/// assert!(ScheduleTime::parse("8:15").is_err());
/// assert!(ScheduleTime::parse("08:61:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleTime(u32);

impl ScheduleTime {
    /// Build a time directly from seconds past midnight.
    pub fn from_seconds(seconds: u32) -> Self {
        Self(seconds)
    }

    /// Parse a time from "HH:MM:SS" format.
    ///
    /// Hours must be two digits and may exceed 23; minutes and seconds
    /// must be two digits in 0-59.
    pub fn parse(s: &str) -> Result<Self, TimeParseError> {
        let bytes = s.as_bytes();

        if bytes.len() != 8 {
            return Err(TimeParseError::new("expected HH:MM:SS format"));
        }
        if bytes[2] != b':' || bytes[5] != b':' {
            return Err(TimeParseError::new("expected colons at positions 2 and 5"));
        }

        let hour = parse_two_digits(&bytes[0..2])
            .ok_or_else(|| TimeParseError::new("invalid hour digits"))?;

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeParseError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeParseError::new("minute must be 0-59"));
        }

        let second = parse_two_digits(&bytes[6..8])
            .ok_or_else(|| TimeParseError::new("invalid second digits"))?;
        if second > 59 {
            return Err(TimeParseError::new("second must be 0-59"));
        }

        Ok(Self(hour * 3600 + minute * 60 + second))
    }

    /// Seconds past midnight on the service date.
    pub fn seconds(&self) -> u32 {
        self.0
    }
}

/// Parse exactly two ASCII digits.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour = self.0 / 3600;
        let minute = (self.0 / 60) % 60;
        let second = self.0 % 60;
        write!(f, "{hour:02}:{minute:02}:{second:02}")
    }
}

impl fmt::Debug for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScheduleTime({self})")
    }
}
