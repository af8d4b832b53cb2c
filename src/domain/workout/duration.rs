//! Step duration value object.

use serde::Serialize;
use std::fmt;

use super::DurationError;

/// Raw duration as supplied by a client, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationInput {
    /// Whole seconds.
    Seconds(i64),
    /// Textual form: `"300"`, `"5min"`, `"2.5 min"` or `"mm:ss"`.
    Text(String),
}

impl DurationInput {
    /// Resolves the input into a validated duration.
    pub fn resolve(&self) -> Result<StepDuration, DurationError> {
        match self {
            DurationInput::Seconds(secs) => StepDuration::from_secs(*secs),
            DurationInput::Text(text) => StepDuration::parse(text),
        }
    }
}

impl From<i64> for DurationInput {
    fn from(secs: i64) -> Self {
        DurationInput::Seconds(secs)
    }
}

impl From<i32> for DurationInput {
    fn from(secs: i32) -> Self {
        DurationInput::Seconds(i64::from(secs))
    }
}

impl From<&str> for DurationInput {
    fn from(text: &str) -> Self {
        DurationInput::Text(text.to_string())
    }
}

/// Positive step duration in whole seconds.
///
/// Bounded so the value still fits the millisecond `uint32` that FIT
/// stores for time-based steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StepDuration(u32);

impl StepDuration {
    /// Largest duration whose millisecond value fits in a `u32`.
    pub const MAX_SECS: u32 = u32::MAX / 1000;

    /// Creates a duration from a signed number of seconds.
    pub fn from_secs(secs: i64) -> Result<Self, DurationError> {
        if secs <= 0 {
            return Err(DurationError::NotPositive(secs));
        }
        if secs > i64::from(Self::MAX_SECS) {
            return Err(DurationError::TooLong { max: Self::MAX_SECS });
        }
        Ok(Self(secs as u32))
    }

    /// Parses a textual duration.
    ///
    /// Accepted forms:
    /// - `"300"` - seconds
    /// - `"5min"`, `"2.5 min"` - minutes, rounded to the nearest second
    /// - `"4:30"` - minutes and seconds
    /// - `"1:04:30"` - hours, minutes and seconds
    pub fn parse(text: &str) -> Result<Self, DurationError> {
        let trimmed = text.trim();
        let unparseable = || DurationError::Unparseable(text.to_string());

        if let Some(minutes) = trimmed.strip_suffix("min") {
            let minutes: f64 = minutes.trim().parse().map_err(|_| unparseable())?;
            if !minutes.is_finite() {
                return Err(unparseable());
            }
            let secs = (minutes * 60.0).round();
            if secs > f64::from(Self::MAX_SECS) {
                return Err(DurationError::TooLong { max: Self::MAX_SECS });
            }
            return Self::from_secs(secs as i64);
        }

        if trimmed.contains(':') {
            return Self::parse_clock(trimmed).ok_or_else(unparseable)?;
        }

        let secs: i64 = trimmed.parse().map_err(|_| unparseable())?;
        Self::from_secs(secs)
    }

    fn parse_clock(text: &str) -> Option<Result<Self, DurationError>> {
        let parts: Vec<&str> = text.split(':').map(str::trim).collect();
        let numbers: Vec<i64> = parts
            .iter()
            .map(|p| p.parse::<i64>().ok().filter(|n| *n >= 0))
            .collect::<Option<_>>()?;

        let secs = match numbers.as_slice() {
            [m, s] if *s < 60 => m.checked_mul(60)?.checked_add(*s)?,
            [h, m, s] if *m < 60 && *s < 60 => h
                .checked_mul(3600)?
                .checked_add(m * 60)?
                .checked_add(*s)?,
            _ => return None,
        };
        Some(Self::from_secs(secs))
    }

    /// Returns the duration in seconds.
    pub fn as_secs(&self) -> u32 {
        self.0
    }

    /// Returns the duration in milliseconds, the unit FIT uses for time steps.
    pub fn as_millis(&self) -> u32 {
        self.0 * 1000
    }
}

impl fmt::Display for StepDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
