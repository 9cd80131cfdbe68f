use async_trait::async_trait;

/// Prompt handed to a content provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderPrompt {
    pub system: String,
    pub user: String,
    /// Identifier for the output schema, used by providers that name schemas
    pub schema_name: String,
    pub schema: serde_json::Value,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("provider api error: {0}")]
    Api(String),
    #[error("invalid provider request: {0}")]
    InvalidRequest(String),
}

/// Repository for text generation.
/// Abstracts the underlying provider (OpenAI, or a test double).
///
/// Implementations issue exactly one upstream request per call and return
/// the raw text the provider produced, or `None` when it produced nothing.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn generate(&self, prompt: &ProviderPrompt) -> Result<Option<String>, ProviderError>;
}
