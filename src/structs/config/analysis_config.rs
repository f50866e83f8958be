use serde::Deserialize;

use crate::config::constants::{
    DEFAULT_CONCURRENCY_LIMIT, DEFAULT_STATIC_CHECK_TIMEOUT_SECS, MAX_MEMBER_SIZE_BYTES,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Upper bound on artifacts analyzed concurrently within one batch.
    pub concurrency_limit: usize,
    /// Wall-clock limit for one static-analysis subprocess.
    pub static_check_timeout_secs: u64,
    /// Archive members above this byte size are skipped.
    pub max_member_size_bytes: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
            static_check_timeout_secs: DEFAULT_STATIC_CHECK_TIMEOUT_SECS,
            max_member_size_bytes: MAX_MEMBER_SIZE_BYTES,
        }
    }
}
