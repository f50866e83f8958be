use std::sync::Arc;

use crate::config::constants::REVIEW_ERROR_MARKER;
use crate::services::content_decoder;
use crate::services::scratch::{self, ScratchFile};
use crate::services::semantic_reviewer::SemanticReviewer;
use crate::services::static_analyzer::StaticAnalyzer;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::artifact::Artifact;

/// Runs the full pipeline for one artifact: decode, then static analysis and
/// semantic review concurrently. Stateless and idempotent; never returns an
/// error, since every failure mode is encoded into the result.
#[derive(Clone)]
pub struct ArtifactAnalyzer {
    static_analyzer: Arc<StaticAnalyzer>,
    reviewer: Arc<SemanticReviewer>,
}

impl ArtifactAnalyzer {
    pub fn new(static_analyzer: Arc<StaticAnalyzer>, reviewer: Arc<SemanticReviewer>) -> Self {
        Self {
            static_analyzer,
            reviewer,
        }
    }

    pub async fn analyze(&self, artifact: Artifact) -> AnalysisResult {
        let language = content_decoder::classify(&artifact.name);

        let text = match content_decoder::decode_strict(&artifact.bytes) {
            Ok(text) => text,
            Err(_) => {
                // Short-circuit: neither stage runs on undecodable content.
                return AnalysisResult::placeholder(
                    &artifact.name,
                    language,
                    format!(
                        "{} Encoding error: file is not valid UTF-8 and cannot be reviewed.",
                        REVIEW_ERROR_MARKER
                    ),
                );
            }
        };

        // The static tool needs a real path; the scratch file is released on
        // every exit path below.
        let scratch = match ScratchFile::write(
            &artifact.bytes,
            &scratch::extension_suffix(&artifact.name),
        ) {
            Ok(scratch) => scratch,
            Err(e) => {
                return AnalysisResult::placeholder(
                    &artifact.name,
                    language,
                    format!(
                        "{} Could not stage file for analysis: {}",
                        REVIEW_ERROR_MARKER, e
                    ),
                );
            }
        };

        let (static_check, review) = tokio::join!(
            self.static_analyzer.analyze(scratch.path(), language),
            self.reviewer.review(language, text),
        );

        AnalysisResult::new(&artifact.name, language, static_check, review)
    }
}
