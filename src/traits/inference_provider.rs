use async_trait::async_trait;

use crate::enums::ai_provider_error::AiProviderError;

/// Capability behind the semantic review stage: accepts prompt text, returns
/// text or an error. Implementations must tolerate many in-flight calls on
/// one shared handle.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    async fn generate(&self, prompt: String) -> Result<String, AiProviderError>;
}
