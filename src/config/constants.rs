use std::time::Duration;

use crate::enums::language::Language;

pub const GENAI_API_KEY_ENV: &str = "GENAI_API_KEY";
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

pub const DEFAULT_CONCURRENCY_LIMIT: usize = 8;
pub const DEFAULT_STATIC_CHECK_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_REVIEW_TIMEOUT_SECS: u64 = 120;

/// Archive members above this size are skipped with a placeholder result.
pub const MAX_MEMBER_SIZE_BYTES: u64 = 5 * 1024 * 1024;

pub const ARCHIVE_EXTENSION: &str = ".zip";

/// Marker embedded in review text when a stage failed. A result whose review
/// contains this marker counts as a failure.
pub const REVIEW_ERROR_MARKER: &str = "⚠️";

pub const STATIC_CHECK_NOT_APPLICABLE: &str = "N/A";

/// Archive member names ending in one of these are never analyzed.
pub const SKIPPED_FILENAME_SUFFIXES: &[&str] = &[".DS_Store", "LICENSE", "README.md"];

pub const LANGUAGE_EXTENSIONS: &[(&str, Language)] = &[
    ("py", Language::Python),
    ("swift", Language::Swift),
    ("c", Language::C),
    ("cpp", Language::Cpp),
    ("js", Language::JavaScript),
    ("java", Language::Java),
];

pub fn timeout_duration(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}
