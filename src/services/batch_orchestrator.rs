use std::sync::Arc;

use futures::future;
use tokio::sync::Semaphore;

use crate::config::constants::REVIEW_ERROR_MARKER;
use crate::services::artifact_analyzer::ArtifactAnalyzer;
use crate::services::content_decoder;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::artifact::Artifact;
use crate::structs::batch_report::BatchReport;

/// Fans one analysis task out per artifact and fans the results back in.
/// Dispatch is semaphore-bounded so siblings never block each other while
/// resource usage stays capped. One task's failure, including a panic, never
/// cancels siblings; a panicked task still yields a placeholder result.
pub struct BatchOrchestrator {
    analyzer: ArtifactAnalyzer,
    concurrency_limit: usize,
}

impl BatchOrchestrator {
    pub fn new(analyzer: ArtifactAnalyzer, concurrency_limit: usize) -> Self {
        Self {
            analyzer,
            concurrency_limit: concurrency_limit.max(1),
        }
    }

    pub async fn run(&self, artifacts: Vec<Artifact>) -> BatchReport {
        let semaphore = Arc::new(Semaphore::new(self.concurrency_limit));
        let mut identities = Vec::with_capacity(artifacts.len());
        let mut handles = Vec::with_capacity(artifacts.len());

        for artifact in artifacts {
            // Identity is kept outside the task so a panicked task still
            // accounts for its artifact.
            identities.push((artifact.name.clone(), content_decoder::classify(&artifact.name)));

            let analyzer = self.analyzer.clone();
            let semaphore = Arc::clone(&semaphore);
            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                analyzer.analyze(artifact).await
            }));
        }

        let outcomes = future::join_all(handles).await;

        let mut results = Vec::with_capacity(outcomes.len());
        for ((name, language), outcome) in identities.into_iter().zip(outcomes) {
            match outcome {
                Ok(result) => results.push(result),
                Err(e) => {
                    log::error!("❌ Analysis task for '{}' failed: {}", name, e);
                    results.push(AnalysisResult::placeholder(
                        name,
                        language,
                        format!("{} Internal error during analysis: {}", REVIEW_ERROR_MARKER, e),
                    ));
                }
            }
        }

        BatchReport::new(results)
    }
}
