use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Metadata for an uploaded audio file
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct AudioFile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub artist: String,
    pub file_name: String,
    pub mime_type: String,
    pub file_size_bytes: i64,
    pub duration_seconds: Option<f64>,
    pub bpm: Option<i32>,
    pub mood: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Values for a new audio file row
#[derive(Debug, Clone)]
pub struct NewAudioFile {
    pub user_id: Uuid,
    pub title: String,
    pub artist: String,
    pub file_name: String,
    pub mime_type: String,
    pub file_size_bytes: i64,
    pub duration_seconds: Option<f64>,
    pub bpm: Option<i32>,
    pub mood: Option<String>,
}

/// Analysis fields that may be filled in after upload.
/// `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackAnalysis {
    pub duration_seconds: Option<f64>,
    pub bpm: Option<i32>,
    pub mood: Option<String>,
}
