use std::fs;
use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use codervet::enums::ai_provider_error::AiProviderError;
use codervet::enums::commands::Commands;
use codervet::errors::CodervetError;
use codervet::services::archive_extractor::ArchiveExtractor;
use codervet::services::artifact_analyzer::ArtifactAnalyzer;
use codervet::services::batch_orchestrator::BatchOrchestrator;
use codervet::services::semantic_reviewer::SemanticReviewer;
use codervet::services::static_analyzer::StaticAnalyzer;
use codervet::structs::artifact::Artifact;
use codervet::structs::config::config::Config;
use codervet::traits::inference_provider::InferenceProvider;
use codervet::workers::command_runner::CommandRunner;

struct FakeProvider {
    calls: AtomicUsize,
    response: String,
}

impl FakeProvider {
    fn new(response: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            response: response.to_string(),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InferenceProvider for FakeProvider {
    async fn generate(&self, prompt: String) -> Result<String, AiProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if prompt.contains("boom()") {
            panic!("provider exploded");
        }
        Ok(self.response.clone())
    }
}

fn orchestrator(provider: Arc<FakeProvider>) -> BatchOrchestrator {
    let static_analyzer = Arc::new(StaticAnalyzer::new(Duration::from_secs(10)));
    let reviewer = Arc::new(SemanticReviewer::new(provider, Duration::from_secs(10)));
    BatchOrchestrator::new(ArtifactAnalyzer::new(static_analyzer, reviewer), 8)
}

fn build_zip(members: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in members {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

#[tokio::test]
async fn batch_of_n_artifacts_yields_n_results_by_name() {
    let provider = FakeProvider::new("looks fine");
    let artifacts: Vec<Artifact> = (0..12)
        .map(|i| Artifact::new(format!("file_{i}.js"), b"console.log(1);".to_vec()))
        .collect();

    let report = orchestrator(Arc::clone(&provider)).run(artifacts).await;

    assert_eq!(report.len(), 12);
    for i in 0..12 {
        let name = format!("file_{i}.js");
        let result = report.find(&name).expect("missing artifact result");
        assert_eq!(result.review, "looks fine");
        assert!(!result.is_failure());
    }
    assert_eq!(provider.call_count(), 12);
}

#[tokio::test]
async fn empty_batch_is_a_well_formed_zero_entry_report() {
    let provider = FakeProvider::new("unused");
    let report = orchestrator(provider).run(Vec::new()).await;
    assert!(report.is_empty());
}

#[tokio::test]
async fn non_utf8_artifact_is_accounted_for_without_running_stages() {
    let provider = FakeProvider::new("unused");
    let artifacts = vec![Artifact::new("binary.py", vec![0xff, 0xfe, 0x00, 0x01])];

    let report = orchestrator(Arc::clone(&provider)).run(artifacts).await;

    assert_eq!(report.len(), 1);
    let result = &report.results[0];
    assert_eq!(result.static_check, "N/A");
    assert!(result.review.contains("not valid UTF-8"));
    assert!(result.is_failure());
    // The inference endpoint was never invoked for the failed decode.
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn panicking_task_does_not_cancel_siblings() {
    let provider = FakeProvider::new("ok");
    let artifacts = vec![
        Artifact::new("good.js", b"const x = 1;".to_vec()),
        Artifact::new("trigger.js", b"boom()".to_vec()),
    ];

    let report = orchestrator(Arc::clone(&provider)).run(artifacts).await;

    assert_eq!(report.len(), 2);
    let good = report.find("good.js").unwrap();
    assert_eq!(good.review, "ok");
    let bad = report.find("trigger.js").unwrap();
    assert!(bad.is_failure());
    assert!(bad.review.contains("Internal error"));
}

#[tokio::test]
async fn same_artifact_twice_yields_identical_static_check() {
    let provider = FakeProvider::new("review text");
    let artifacts = vec![
        Artifact::new("dup.java", b"class A {}".to_vec()),
        Artifact::new("dup.java", b"class A {}".to_vec()),
    ];

    let report = orchestrator(provider).run(artifacts).await;

    assert_eq!(report.len(), 2);
    assert_eq!(report.results[0].static_check, report.results[1].static_check);
}

#[tokio::test]
async fn archive_with_oversized_and_valid_member_yields_two_results() {
    let big = vec![b'x'; 4096];
    let bytes = build_zip(&[("ok.js", b"let a = 1;" as &[u8]), ("huge.js", big.as_slice())]);

    let extractor = ArchiveExtractor::new(1024);
    let extracted = extractor.extract("mixed.zip", &bytes).unwrap();

    let provider = FakeProvider::new("reviewed");
    let mut report = orchestrator(Arc::clone(&provider)).run(extracted.artifacts).await;
    report.results.extend(extracted.skipped);

    assert_eq!(report.len(), 2);
    let analyzed = report.find("ok.js").unwrap();
    assert_eq!(analyzed.review, "reviewed");
    let skipped = report.find("huge.js").unwrap();
    assert!(skipped.review.contains("too large"));
    assert_eq!(skipped.static_check, "N/A");
    // Only the surviving member reached the reviewer.
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn malformed_archive_is_a_single_request_level_error() {
    let extractor = ArchiveExtractor::new(1024);
    let result = extractor.extract("corrupt.zip", b"PK\x03\x04 but truncated garbage");
    assert!(matches!(result, Err(CodervetError::MalformedArchive { .. })));
}

#[tokio::test]
async fn empty_batch_command_is_rejected() {
    let runner = CommandRunner::with_provider(Config::default(), FakeProvider::new("unused"));
    let result = runner
        .run_command(Commands::Batch { files: Vec::new() })
        .await;
    assert!(matches!(result, Err(CodervetError::EmptyBatch)));
}

#[tokio::test]
async fn non_zip_input_to_archive_command_is_rejected_before_reading() {
    let runner = CommandRunner::with_provider(Config::default(), FakeProvider::new("unused"));
    let result = runner
        .run_command(Commands::Archive {
            file: "sources.tar.gz".into(),
        })
        .await;
    assert!(matches!(
        result,
        Err(CodervetError::UnsupportedArchive { .. })
    ));
}

#[tokio::test]
async fn single_review_escalates_decode_failure_to_request_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.py");
    fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

    let runner = CommandRunner::with_provider(Config::default(), FakeProvider::new("unused"));
    let result = runner.run_command(Commands::Review { file: path }).await;

    match result {
        Err(CodervetError::ReviewFailed { filename, detail }) => {
            assert_eq!(filename, "bad.py");
            assert!(detail.contains("not valid UTF-8"));
        }
        other => panic!("expected ReviewFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn single_review_of_valid_file_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fine.js");
    fs::write(&path, "const answer = 42;").unwrap();

    let runner = CommandRunner::with_provider(Config::default(), FakeProvider::new("all good"));
    let result = runner.run_command(Commands::Review { file: path }).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn batch_command_tolerates_individual_failures() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.js");
    let bad = dir.path().join("bad.js");
    fs::write(&good, "let ok = true;").unwrap();
    fs::write(&bad, [0xff, 0xfe]).unwrap();

    let runner = CommandRunner::with_provider(Config::default(), FakeProvider::new("fine"));
    let result = runner
        .run_command(Commands::Batch {
            files: vec![good, bad],
        })
        .await;

    // Per-artifact failures stay inside the report; the request succeeds.
    assert!(result.is_ok());
}
