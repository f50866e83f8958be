pub mod ai_providers;
pub mod archive_extractor;
pub mod artifact_analyzer;
pub mod batch_orchestrator;
pub mod content_decoder;
pub mod scratch;
pub mod semantic_reviewer;
pub mod static_analyzer;
