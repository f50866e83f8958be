use serde::Deserialize;

use crate::config::constants::{DEFAULT_MODEL, DEFAULT_REVIEW_TIMEOUT_SECS};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub model: String,
    /// Generous upper bound on one inference call, so a hung call cannot hold
    /// its task's resources forever.
    pub review_timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            review_timeout_secs: DEFAULT_REVIEW_TIMEOUT_SECS,
        }
    }
}
