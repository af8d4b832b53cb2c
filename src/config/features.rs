//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureFlags {
    /// Include encoder failure reasons in 500 responses (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,
}
