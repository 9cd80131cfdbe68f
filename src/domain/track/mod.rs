pub mod error;
pub mod model;
pub mod service;

pub use error::TrackServiceError;
pub use model::{AudioFile, NewAudioFile, TrackAnalysis};
pub use service::{TrackService, TrackServiceApi};

use crate::domain::content::{ContentKind, StoredContent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Request for POST /api/users/:userId/tracks
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterTrackRequest {
    pub title: String,
    pub artist: String,
    pub file_name: String,
    pub mime_type: String,
    pub file_size_bytes: i64,
    #[serde(default)]
    pub duration_seconds: Option<f64>,
    #[serde(default)]
    pub bpm: Option<i32>,
    #[serde(default)]
    pub mood: Option<String>,
}

/// Response for track endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct TrackResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub artist: String,
    pub file_name: String,
    pub mime_type: String,
    pub file_size_bytes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bpm: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AudioFile> for TrackResponse {
    fn from(file: AudioFile) -> Self {
        Self {
            id: file.id,
            user_id: file.user_id,
            title: file.title,
            artist: file.artist,
            file_name: file.file_name,
            mime_type: file.mime_type,
            file_size_bytes: file.file_size_bytes,
            duration_seconds: file.duration_seconds,
            bpm: file.bpm,
            mood: file.mood,
            created_at: file.created_at,
        }
    }
}

/// Request for POST /api/tracks/:trackId/content
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub kind: ContentKind,
    /// Overrides the mood stored on the track
    #[serde(default)]
    pub mood: Option<String>,
    /// Store the result against the track, replacing earlier content of the same kind
    #[serde(default = "default_persist")]
    pub persist: bool,
}

fn default_persist() -> bool {
    true
}

/// Response for content endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ContentResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub kind: ContentKind,
    pub payload: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<StoredContent> for ContentResponse {
    fn from(content: StoredContent) -> Self {
        Self {
            id: Some(content.id),
            kind: content.content_type,
            payload: content.payload,
            created_at: Some(content.created_at),
        }
    }
}
