use serde::Serialize;

use crate::config::constants::{REVIEW_ERROR_MARKER, STATIC_CHECK_NOT_APPLICABLE};
use crate::enums::language::Language;

/// Combined report for one artifact. Stage failures are recorded inside the
/// report text, so every submitted artifact yields exactly one of these.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub filename: String,
    pub language: Language,
    pub static_check: String,
    pub review: String,
}

impl AnalysisResult {
    pub fn new(
        filename: impl Into<String>,
        language: Language,
        static_check: String,
        review: String,
    ) -> Self {
        Self {
            filename: filename.into(),
            language,
            static_check,
            review,
        }
    }

    /// Result for an artifact that was skipped or failed before analysis ran.
    pub fn placeholder(filename: impl Into<String>, language: Language, review: String) -> Self {
        Self {
            filename: filename.into(),
            language,
            static_check: STATIC_CHECK_NOT_APPLICABLE.to_string(),
            review,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.review.contains(REVIEW_ERROR_MARKER)
    }
}
