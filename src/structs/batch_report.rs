use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::structs::analysis_result::AnalysisResult;

/// One result per submitted artifact. Entry order follows completion, not
/// submission; consumers group by filename.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub results: Vec<AnalysisResult>,
}

impl BatchReport {
    pub fn new(results: Vec<AnalysisResult>) -> Self {
        Self {
            generated_at: Utc::now(),
            results,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    pub fn find(&self, filename: &str) -> Option<&AnalysisResult> {
        self.results.iter().find(|r| r.filename == filename)
    }
}
