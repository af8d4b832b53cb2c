//! Workout name value object.

use serde::Serialize;
use std::fmt;

use super::WorkoutError;

/// Name of a workout routine.
///
/// Also the stem of the downloaded file name, so characters that are
/// unsafe in a file name or an HTTP header are replaced by
/// [`WorkoutName::file_stem`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WorkoutName(String);

impl WorkoutName {
    pub fn new(raw: impl Into<String>) -> Result<Self, WorkoutError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(WorkoutError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name stem with path separators, quotes and control characters
    /// replaced by `_`.
    pub fn file_stem(&self) -> String {
        self.0
            .chars()
            .map(|c| match c {
                '/' | '\\' | '"' | ':' | '*' | '?' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect()
    }

    /// ASCII-only variant of [`file_stem`](Self::file_stem), for the plain
    /// `filename` parameter of `Content-Disposition`.
    pub fn ascii_file_stem(&self) -> String {
        self.file_stem()
            .chars()
            .map(|c| if c.is_ascii() { c } else { '_' })
            .collect()
    }
}

impl fmt::Display for WorkoutName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
