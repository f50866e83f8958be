use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::config::config_manager::ConfigManager;
use crate::config::constants::{timeout_duration, GENAI_API_KEY_ENV};
use crate::enums::commands::Commands;
use crate::errors::{CodervetError, CodervetResult};
use crate::services::ai_providers::gemini::GeminiProvider;
use crate::services::archive_extractor::ArchiveExtractor;
use crate::services::artifact_analyzer::ArtifactAnalyzer;
use crate::services::batch_orchestrator::BatchOrchestrator;
use crate::services::semantic_reviewer::SemanticReviewer;
use crate::services::static_analyzer::StaticAnalyzer;
use crate::structs::artifact::Artifact;
use crate::structs::batch_report::BatchReport;
use crate::structs::config::config::Config;
use crate::traits::inference_provider::InferenceProvider;

pub struct CommandRunner {
    config: Config,
    orchestrator: BatchOrchestrator,
}

impl CommandRunner {
    pub fn new() -> CodervetResult<Self> {
        let config = ConfigManager::load()?;
        let api_key = std::env::var(GENAI_API_KEY_ENV).map_err(|_| {
            CodervetError::Configuration(format!(
                "{} must be set in the environment",
                GENAI_API_KEY_ENV
            ))
        })?;
        let provider: Arc<dyn InferenceProvider> =
            Arc::new(GeminiProvider::new(api_key, config.ai.model.clone()));
        Ok(Self::with_provider(config, provider))
    }

    /// The inference client is constructed once and injected here, so tests
    /// can substitute a fake provider.
    pub fn with_provider(config: Config, provider: Arc<dyn InferenceProvider>) -> Self {
        let static_analyzer = Arc::new(StaticAnalyzer::new(timeout_duration(
            config.analysis.static_check_timeout_secs,
        )));
        let reviewer = Arc::new(SemanticReviewer::new(
            provider,
            timeout_duration(config.ai.review_timeout_secs),
        ));
        let analyzer = ArtifactAnalyzer::new(static_analyzer, reviewer);
        let orchestrator = BatchOrchestrator::new(analyzer, config.analysis.concurrency_limit);
        Self {
            config,
            orchestrator,
        }
    }

    pub async fn run_command(&self, command: Commands) -> CodervetResult<()> {
        let start = Instant::now();

        let result = match command {
            Commands::Review { file } => self.review_command(file).await,
            Commands::Batch { files } => self.batch_command(files).await,
            Commands::Archive { file } => self.archive_command(file).await,
        };

        log::info!(
            "⏱️  Command completed in {:.2}s",
            start.elapsed().as_secs_f64()
        );
        result
    }

    /// Singleton asymmetry: a review error marker in the one result becomes
    /// a request-level failure, unlike batches which tolerate it.
    async fn review_command(&self, file: PathBuf) -> CodervetResult<()> {
        let artifact = read_artifact(&file)?;
        log::info!("🔍 Reviewing {}", artifact.name);

        let report = self.orchestrator.run(vec![artifact]).await;
        let result = report
            .results
            .into_iter()
            .next()
            .ok_or_else(|| {
                CodervetError::system_error("analysis", "batch produced no result for the input")
            })?;

        if result.is_failure() {
            return Err(CodervetError::ReviewFailed {
                filename: result.filename,
                detail: result.review,
            });
        }

        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| CodervetError::system_error("serialize report", e))?;
        println!("{}", json);
        Ok(())
    }

    async fn batch_command(&self, files: Vec<PathBuf>) -> CodervetResult<()> {
        if files.is_empty() {
            return Err(CodervetError::EmptyBatch);
        }

        let mut artifacts = Vec::with_capacity(files.len());
        for file in &files {
            artifacts.push(read_artifact(file)?);
        }

        log::info!("🔍 Reviewing {} files", artifacts.len());
        let report = self.orchestrator.run(artifacts).await;
        self.print_report(&report)
    }

    async fn archive_command(&self, file: PathBuf) -> CodervetResult<()> {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file.display().to_string());
        ArchiveExtractor::ensure_zip_name(&name)?;

        let bytes = fs::read(&file).map_err(|e| CodervetError::file_error(&file, "read", e))?;
        let extractor = ArchiveExtractor::new(self.config.analysis.max_member_size_bytes);
        let extracted = extractor.extract(&name, &bytes)?;

        log::info!(
            "📦 Extracted {} analyzable files ({} skipped) from {}",
            extracted.artifacts.len(),
            extracted.skipped.len(),
            name
        );

        let mut report = self.orchestrator.run(extracted.artifacts).await;
        report.results.extend(extracted.skipped);
        self.print_report(&report)
    }

    fn print_report(&self, report: &BatchReport) -> CodervetResult<()> {
        let failures = report.failure_count();
        if failures > 0 {
            log::warn!("⚠️ {} of {} files reported errors", failures, report.len());
        } else {
            log::info!("✅ Reviewed {} files", report.len());
        }

        let json = serde_json::to_string_pretty(report)
            .map_err(|e| CodervetError::system_error("serialize report", e))?;
        println!("{}", json);
        Ok(())
    }
}

fn read_artifact(path: &Path) -> CodervetResult<Artifact> {
    let bytes = fs::read(path).map_err(|e| CodervetError::file_error(path, "read", e))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Artifact::new(name, bytes))
}
