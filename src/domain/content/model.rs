use super::ContentKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// A generated payload persisted in `ai_generated_content`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct StoredContent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub audio_file_id: Option<Uuid>,
    pub content_type: ContentKind,
    pub payload: JsonValue,
    pub created_at: DateTime<Utc>,
}
