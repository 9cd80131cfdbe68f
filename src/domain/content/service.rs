use super::error::GenerationFailure;
use super::schema::build_prompt;
use super::{
    ContentKind, DjPromoKit, GeneratedPayload, GeneratedShape, GenerationRequest, GrowthContent,
    SocialUplinkBundle,
};
use crate::infrastructure::repositories::ContentProvider;
use regex::Regex;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings the generator needs from the process configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl GeneratorConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Turns creative inputs into typed promotional content.
///
/// Every failure (missing credential, invalid input, provider fault,
/// malformed payload) yields `None`; the cause is only visible in logs.
pub struct ContentGenerator {
    provider: Arc<dyn ContentProvider>,
    config: GeneratorConfig,
}

impl ContentGenerator {
    pub fn new(provider: Arc<dyn ContentProvider>, config: GeneratorConfig) -> Self {
        Self { provider, config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.has_credential()
    }

    pub async fn generate_dj_promo(
        &self,
        track_title: &str,
        artist: &str,
        vibe: &str,
    ) -> Option<DjPromoKit> {
        let request = GenerationRequest::new(ContentKind::DjPromo, track_title, artist, vibe);
        self.run(&request).await
    }

    pub async fn generate_social_uplink(
        &self,
        track_title: &str,
        artist: &str,
        vibe: &str,
    ) -> Option<SocialUplinkBundle> {
        let request = GenerationRequest::new(ContentKind::SocialUplink, track_title, artist, vibe);
        self.run(&request).await
    }

    /// `artist` may be empty; `topic` and `tone` are required
    pub async fn generate_growth_content(
        &self,
        topic: &str,
        tone: &str,
        artist: &str,
    ) -> Option<GrowthContent> {
        let request = GenerationRequest::new(ContentKind::GrowthContent, topic, artist, tone);
        self.run(&request).await
    }

    /// Dispatch on the request's kind
    pub async fn generate(&self, request: &GenerationRequest) -> Option<GeneratedPayload> {
        match request.kind {
            ContentKind::DjPromo => self.run(request).await.map(GeneratedPayload::DjPromo),
            ContentKind::SocialUplink => {
                self.run(request).await.map(GeneratedPayload::SocialUplink)
            }
            ContentKind::GrowthContent => {
                self.run(request).await.map(GeneratedPayload::GrowthContent)
            }
        }
    }

    async fn run<T: GeneratedShape>(&self, request: &GenerationRequest) -> Option<T> {
        debug_assert_eq!(request.kind, T::KIND);

        match self.try_generate::<T>(request).await {
            Ok(content) => {
                tracing::info!(
                    kind = %T::KIND,
                    subject_title = %request.subject_title,
                    "Generated promotional content"
                );
                Some(content)
            }
            Err(failure) => {
                tracing::warn!(
                    kind = %T::KIND,
                    failure = failure.kind(),
                    reason = %failure,
                    "Content generation produced no result"
                );
                None
            }
        }
    }

    async fn try_generate<T: GeneratedShape>(
        &self,
        request: &GenerationRequest,
    ) -> Result<T, GenerationFailure> {
        if !self.config.has_credential() {
            return Err(GenerationFailure::MissingCredential);
        }

        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(GenerationFailure::InvalidInput(missing.join(", ")));
        }

        let prompt = build_prompt(request);

        let response = tokio::time::timeout(self.config.timeout, self.provider.generate(&prompt))
            .await
            .map_err(|_| {
                GenerationFailure::TransportFault(format!(
                    "no response within {}s",
                    self.config.timeout.as_secs_f64()
                ))
            })?
            .map_err(|e| GenerationFailure::TransportFault(e.to_string()))?;

        let text = response
            .filter(|text| !text.trim().is_empty())
            .ok_or(GenerationFailure::EmptyResponse)?;

        parse_payload(&text)
    }
}

fn fence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)^```[a-zA-Z]*\s*(.*?)\s*```$").expect("fence pattern is valid")
    })
}

/// Strip a surrounding Markdown code fence, if any
fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();
    fence_pattern()
        .captures(trimmed)
        .and_then(|captures| captures.get(1))
        .map(|body| body.as_str())
        .unwrap_or(trimmed)
}

/// Parse provider text into a typed shape, enforcing every field
pub fn parse_payload<T: GeneratedShape>(text: &str) -> Result<T, GenerationFailure> {
    let content: T = serde_json::from_str(extract_json(text))
        .map_err(|e| GenerationFailure::MalformedResponse(e.to_string()))?;

    content
        .validate()
        .map_err(GenerationFailure::MalformedResponse)?;

    Ok(content)
}
