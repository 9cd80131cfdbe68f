use super::content_provider::{ContentProvider, ProviderError, ProviderPrompt};
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs, ResponseFormat,
        ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

const TEMPERATURE: f32 = 0.8;
const MAX_TOKENS: u32 = 1024;

/// OpenAI chat-completions implementation of the content provider
pub struct OpenAiContentProvider {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiContentProvider {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }

    pub fn from_api_key(api_key: &str, model: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self::new(Arc::new(Client::with_config(config)), model)
    }

    /// Build a chat request that asks for output matching the prompt's schema
    fn build_request(
        &self,
        prompt: &ProviderPrompt,
    ) -> Result<CreateChatCompletionRequest, OpenAIError> {
        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(prompt.system.as_str())
            .build()?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt.user.as_str())
            .build()?;

        CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages([system.into(), user.into()])
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    description: None,
                    name: prompt.schema_name.clone(),
                    schema: Some(prompt.schema.clone()),
                    strict: Some(true),
                },
            })
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS)
            .build()
    }
}

impl From<OpenAIError> for ProviderError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::Reqwest(e) if e.is_timeout() => ProviderError::Timeout(e.to_string()),
            OpenAIError::Reqwest(e) => ProviderError::Network(e.to_string()),
            OpenAIError::ApiError(api) => {
                if api.message.to_lowercase().contains("rate limit") {
                    ProviderError::RateLimited(api.message)
                } else {
                    ProviderError::Api(api.message)
                }
            }
            OpenAIError::InvalidArgument(msg) => ProviderError::InvalidRequest(msg),
            other => ProviderError::Api(other.to_string()),
        }
    }
}

#[async_trait]
impl ContentProvider for OpenAiContentProvider {
    async fn generate(&self, prompt: &ProviderPrompt) -> Result<Option<String>, ProviderError> {
        let start_time = std::time::Instant::now();
        let request = self.build_request(prompt)?;

        tracing::info!(
            model = %self.model,
            schema = %prompt.schema_name,
            prompt_length = prompt.user.len(),
            "Calling OpenAI chat completions API"
        );

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                schema = %prompt.schema_name,
                "OpenAI chat completion failed"
            );
            ProviderError::from(e)
        })?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        tracing::info!(
            provider = "openai",
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            response_length = text.as_ref().map(|t| t.len()).unwrap_or(0),
            "Content generation completed"
        );

        Ok(text)
    }
}
