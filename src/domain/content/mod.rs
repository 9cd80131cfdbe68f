pub mod error;
pub mod model;
pub mod schema;
pub mod service;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use error::GenerationFailure;
pub use model::StoredContent;
pub use service::{ContentGenerator, GeneratorConfig};

/// Category of promotional content a generation request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "snake_case")]
pub enum ContentKind {
    DjPromo,
    SocialUplink,
    GrowthContent,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::DjPromo => "dj_promo",
            ContentKind::SocialUplink => "social_uplink",
            ContentKind::GrowthContent => "growth_content",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Creative inputs for a single generation call.
///
/// For growth content `subject_title` is the topic and `mood` the tone or
/// target platform; `subject_author` may be left empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationRequest {
    pub subject_title: String,
    #[serde(default)]
    pub subject_author: String,
    pub mood: String,
    pub kind: ContentKind,
}

impl GenerationRequest {
    pub fn new(
        kind: ContentKind,
        subject_title: impl Into<String>,
        subject_author: impl Into<String>,
        mood: impl Into<String>,
    ) -> Self {
        Self {
            subject_title: subject_title.into(),
            subject_author: subject_author.into(),
            mood: mood.into(),
            kind,
        }
    }

    /// Names of required fields that are empty for this request's kind
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.subject_title.trim().is_empty() {
            missing.push("subject_title");
        }
        if self.kind != ContentKind::GrowthContent && self.subject_author.trim().is_empty() {
            missing.push("subject_author");
        }
        if self.mood.trim().is_empty() {
            missing.push("mood");
        }

        missing
    }
}

/// Promo kit handed to club DJs alongside a track
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DjPromoKit {
    pub club_hype: String,
    pub pool_description: String,
    pub mic_shoutout: String,
    pub target_bpm: String,
    pub mix_tips: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialPost {
    pub caption: String,
    pub hashtags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TikTokPost {
    pub hook: String,
    pub tags: Vec<String>,
    pub audio_suggestion: String,
}

/// Per-platform social media copy for a release
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialUplinkBundle {
    pub facebook: SocialPost,
    pub instagram: SocialPost,
    pub tiktok: TikTokPost,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GrowthContent {
    pub title: String,
    pub content: String,
    pub viral_score: f64,
}

/// A typed payload the provider is asked to produce.
///
/// Deserialization enforces presence and type of every field; `validate`
/// covers the constraints serde cannot express.
pub trait GeneratedShape: DeserializeOwned + Serialize + Send + Sized {
    const KIND: ContentKind;

    fn validate(&self) -> Result<(), String>;
}

fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("field '{}' is empty", field));
    }
    Ok(())
}

impl GeneratedShape for DjPromoKit {
    const KIND: ContentKind = ContentKind::DjPromo;

    fn validate(&self) -> Result<(), String> {
        require_text("clubHype", &self.club_hype)?;
        require_text("poolDescription", &self.pool_description)?;
        require_text("micShoutout", &self.mic_shoutout)?;
        require_text("targetBpm", &self.target_bpm)?;
        require_text("mixTips", &self.mix_tips)
    }
}

impl GeneratedShape for SocialUplinkBundle {
    const KIND: ContentKind = ContentKind::SocialUplink;

    fn validate(&self) -> Result<(), String> {
        require_text("facebook.caption", &self.facebook.caption)?;
        require_text("instagram.caption", &self.instagram.caption)?;
        require_text("tiktok.hook", &self.tiktok.hook)?;
        require_text("tiktok.audioSuggestion", &self.tiktok.audio_suggestion)
    }
}

impl GeneratedShape for GrowthContent {
    const KIND: ContentKind = ContentKind::GrowthContent;

    fn validate(&self) -> Result<(), String> {
        require_text("title", &self.title)?;
        require_text("content", &self.content)?;

        if !self.viral_score.is_finite() || !(0.0..=100.0).contains(&self.viral_score) {
            return Err(format!(
                "field 'viralScore' must be between 0 and 100, got {}",
                self.viral_score
            ));
        }

        Ok(())
    }
}

/// Result of a kind-dispatched generation call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum GeneratedPayload {
    DjPromo(DjPromoKit),
    SocialUplink(SocialUplinkBundle),
    GrowthContent(GrowthContent),
}

impl GeneratedPayload {
    pub fn kind(&self) -> ContentKind {
        match self {
            GeneratedPayload::DjPromo(_) => ContentKind::DjPromo,
            GeneratedPayload::SocialUplink(_) => ContentKind::SocialUplink,
            GeneratedPayload::GrowthContent(_) => ContentKind::GrowthContent,
        }
    }

    /// The payload body alone, as stored in the content table
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            GeneratedPayload::DjPromo(kit) => serde_json::to_value(kit),
            GeneratedPayload::SocialUplink(bundle) => serde_json::to_value(bundle),
            GeneratedPayload::GrowthContent(growth) => serde_json::to_value(growth),
        }
    }
}
