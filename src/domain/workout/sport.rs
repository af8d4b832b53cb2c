//! Sport a workout is written for.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subset of the FIT `sport` enumeration that workouts are built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    Generic,
    #[default]
    Running,
    Cycling,
    Swimming,
    Training,
    Walking,
}

impl Sport {
    /// Returns the FIT `sport` enum value.
    pub fn fit_code(&self) -> u8 {
        match self {
            Sport::Generic => 0,
            Sport::Running => 1,
            Sport::Cycling => 2,
            Sport::Swimming => 5,
            Sport::Training => 10,
            Sport::Walking => 11,
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sport::Generic => "generic",
            Sport::Running => "running",
            Sport::Cycling => "cycling",
            Sport::Swimming => "swimming",
            Sport::Training => "training",
            Sport::Walking => "walking",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sport_is_running() {
        assert_eq!(Sport::default(), Sport::Running);
        assert_eq!(Sport::default().fit_code(), 1);
    }

    #[test]
    fn sport_deserializes_from_snake_case() {
        let sport: Sport = serde_json::from_str("\"cycling\"").unwrap();
        assert_eq!(sport, Sport::Cycling);
        assert_eq!(sport.fit_code(), 2);
    }
}
