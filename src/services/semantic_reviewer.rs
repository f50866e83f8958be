use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use crate::config::constants::REVIEW_ERROR_MARKER;
use crate::enums::language::Language;
use crate::prompts::review_prompt::build_review_prompt;
use crate::traits::inference_provider::InferenceProvider;

/// Sends decoded source text to the inference provider and normalizes the
/// response. Failures become report text carrying the error marker; they are
/// data, never fatal to the batch.
pub struct SemanticReviewer {
    provider: Arc<dyn InferenceProvider>,
    timeout: Duration,
}

impl SemanticReviewer {
    pub fn new(provider: Arc<dyn InferenceProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub async fn review(&self, language: Language, source: &str) -> String {
        let prompt = build_review_prompt(language, source);

        match time::timeout(self.timeout, self.provider.generate(prompt)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => format!("{} Error calling the review model: {}", REVIEW_ERROR_MARKER, e),
            Err(_elapsed) => format!(
                "{} Review request timed out (exceeded {} seconds).",
                REVIEW_ERROR_MARKER,
                self.timeout.as_secs()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::enums::ai_provider_error::AiProviderError;

    struct EchoProvider;

    #[async_trait]
    impl InferenceProvider for EchoProvider {
        async fn generate(&self, prompt: String) -> Result<String, AiProviderError> {
            Ok(format!("reviewed {} bytes", prompt.len()))
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl InferenceProvider for FailingProvider {
        async fn generate(&self, _prompt: String) -> Result<String, AiProviderError> {
            Err(AiProviderError::ApiError("quota exceeded".to_string()))
        }
    }

    struct HangingProvider;

    #[async_trait]
    impl InferenceProvider for HangingProvider {
        async fn generate(&self, _prompt: String) -> Result<String, AiProviderError> {
            time::sleep(Duration::from_secs(60)).await;
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn successful_review_passes_text_through() {
        let reviewer = SemanticReviewer::new(Arc::new(EchoProvider), Duration::from_secs(5));
        let review = reviewer.review(Language::Python, "x = 1").await;
        assert!(review.starts_with("reviewed"));
        assert!(!review.contains(REVIEW_ERROR_MARKER));
    }

    #[tokio::test]
    async fn provider_error_becomes_marked_report_text() {
        let reviewer = SemanticReviewer::new(Arc::new(FailingProvider), Duration::from_secs(5));
        let review = reviewer.review(Language::Python, "x = 1").await;
        assert!(review.contains(REVIEW_ERROR_MARKER));
        assert!(review.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn hung_call_is_bounded_by_the_review_timeout() {
        let reviewer = SemanticReviewer::new(Arc::new(HangingProvider), Duration::from_millis(100));
        let review = reviewer.review(Language::Python, "x = 1").await;
        assert!(review.contains(REVIEW_ERROR_MARKER));
        assert!(review.contains("timed out"));
    }
}
