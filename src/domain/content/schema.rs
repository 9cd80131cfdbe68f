use super::{ContentKind, GenerationRequest};
use crate::infrastructure::repositories::ProviderPrompt;
use serde_json::{json, Value};

const SYSTEM_PROMPT: &str = "You are a music promotion copywriter for independent electronic artists. \
Write punchy, specific copy that a DJ or social media manager can use as-is. \
Respond with a single JSON object that matches the provided schema and nothing else.";

/// JSON schema describing the output shape for a content kind.
///
/// Schemas are strict: every property is required and no extra properties
/// are allowed.
pub fn schema_for(kind: ContentKind) -> Value {
    match kind {
        ContentKind::DjPromo => json!({
            "type": "object",
            "properties": {
                "clubHype": { "type": "string", "description": "One-line hype for club promoters" },
                "poolDescription": { "type": "string", "description": "Record pool description of the track" },
                "micShoutout": { "type": "string", "description": "Shoutout a DJ can read on the mic" },
                "targetBpm": { "type": "string", "description": "BPM range the track sits in, e.g. 124-126 BPM" },
                "mixTips": { "type": "string", "description": "Advice on mixing the track in and out" }
            },
            "required": ["clubHype", "poolDescription", "micShoutout", "targetBpm", "mixTips"],
            "additionalProperties": false
        }),
        ContentKind::SocialUplink => {
            let post = json!({
                "type": "object",
                "properties": {
                    "caption": { "type": "string" },
                    "hashtags": { "type": "array", "items": { "type": "string" } }
                },
                "required": ["caption", "hashtags"],
                "additionalProperties": false
            });

            json!({
                "type": "object",
                "properties": {
                    "facebook": post.clone(),
                    "instagram": post,
                    "tiktok": {
                        "type": "object",
                        "properties": {
                            "hook": { "type": "string" },
                            "tags": { "type": "array", "items": { "type": "string" } },
                            "audioSuggestion": { "type": "string" }
                        },
                        "required": ["hook", "tags", "audioSuggestion"],
                        "additionalProperties": false
                    }
                },
                "required": ["facebook", "instagram", "tiktok"],
                "additionalProperties": false
            })
        }
        ContentKind::GrowthContent => json!({
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "content": { "type": "string" },
                "viralScore": { "type": "number", "description": "Estimated reach potential from 0 to 100" }
            },
            "required": ["title", "content", "viralScore"],
            "additionalProperties": false
        }),
    }
}

fn schema_name(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::DjPromo => "dj_promo_kit",
        ContentKind::SocialUplink => "social_uplink_bundle",
        ContentKind::GrowthContent => "growth_content",
    }
}

fn user_prompt(request: &GenerationRequest) -> String {
    let title = request.subject_title.trim();
    let artist = request.subject_author.trim();
    let mood = request.mood.trim();

    match request.kind {
        ContentKind::DjPromo => format!(
            "Create a DJ promo kit for the track \"{}\" by {}. The vibe is {}. \
             Include club hype, a record pool description, a mic shoutout, \
             the target BPM range and mixing tips.",
            title, artist, mood
        ),
        ContentKind::SocialUplink => format!(
            "Create social media posts announcing the track \"{}\" by {}. The vibe is {}. \
             Write a Facebook caption with hashtags, an Instagram caption with hashtags, \
             and a TikTok hook with tags and a suggestion for which part of the audio to use.",
            title, artist, mood
        ),
        ContentKind::GrowthContent => {
            let by_line = if artist.is_empty() {
                String::new()
            } else {
                format!(" for the artist {}", artist)
            };
            format!(
                "Write growth marketing content{} on the topic \"{}\". \
                 Tone and platform: {}. Give it a title, the body content, \
                 and a viral score from 0 to 100 estimating its reach potential.",
                by_line, title, mood
            )
        }
    }
}

/// Build the provider prompt for a validated request
pub fn build_prompt(request: &GenerationRequest) -> ProviderPrompt {
    ProviderPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user: user_prompt(request),
        schema_name: schema_name(request.kind).to_string(),
        schema: schema_for(request.kind),
    }
}
