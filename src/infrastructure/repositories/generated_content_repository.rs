use crate::domain::content::{ContentKind, StoredContent};
use crate::error::{AppError, AppResult};
use crate::infrastructure::db::DbPool;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use uuid::Uuid;

pub struct GeneratedContentRepository {
    pool: Arc<DbPool>,
}

impl GeneratedContentRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        audio_file_id: Option<Uuid>,
        kind: ContentKind,
        payload: &JsonValue,
    ) -> AppResult<StoredContent> {
        let pool = self.pool.as_ref();

        let content = sqlx::query_as::<_, StoredContent>(
            r#"
            INSERT INTO ai_generated_content (id, user_id, audio_file_id, content_type, payload, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(audio_file_id)
        .bind(kind)
        .bind(payload)
        .bind(chrono::Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(content)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StoredContent>> {
        let pool = self.pool.as_ref();
        let content = sqlx::query_as::<_, StoredContent>(
            "SELECT * FROM ai_generated_content WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(content)
    }

    /// Content generated for a track, newest first
    pub async fn find_by_audio_file(&self, audio_file_id: Uuid) -> AppResult<Vec<StoredContent>> {
        let pool = self.pool.as_ref();
        let contents = sqlx::query_as::<_, StoredContent>(
            r#"
            SELECT * FROM ai_generated_content
            WHERE audio_file_id = $1
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(audio_file_id)
        .fetch_all(pool)
        .await?;

        Ok(contents)
    }

    /// All content owned by a user, optionally restricted to one kind
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        kind: Option<ContentKind>,
    ) -> AppResult<Vec<StoredContent>> {
        let pool = self.pool.as_ref();
        let contents = sqlx::query_as::<_, StoredContent>(
            r#"
            SELECT * FROM ai_generated_content
            WHERE user_id = $1 AND ($2::text IS NULL OR content_type = $2)
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(user_id)
        .bind(kind.map(|k| k.as_str()))
        .fetch_all(pool)
        .await?;

        Ok(contents)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query("DELETE FROM ai_generated_content WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Swap the stored content of one kind for a track.
    ///
    /// Runs in a single transaction: earlier rows of the same kind are
    /// removed and the new payload inserted, or nothing changes. The track
    /// row is locked first so concurrent replaces for one track serialize.
    pub async fn replace_for_audio_file(
        &self,
        user_id: Uuid,
        audio_file_id: Uuid,
        kind: ContentKind,
        payload: &JsonValue,
    ) -> AppResult<StoredContent> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT id FROM audio_files WHERE id = $1 FOR UPDATE")
            .bind(audio_file_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Track not found".to_string()))?;

        let removed = sqlx::query(
            "DELETE FROM ai_generated_content WHERE audio_file_id = $1 AND content_type = $2",
        )
        .bind(audio_file_id)
        .bind(kind)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let content = sqlx::query_as::<_, StoredContent>(
            r#"
            INSERT INTO ai_generated_content (id, user_id, audio_file_id, content_type, payload, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(audio_file_id)
        .bind(kind)
        .bind(payload)
        .bind(chrono::Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            audio_file_id = %audio_file_id,
            kind = %kind,
            replaced = removed,
            "Generated content replaced"
        );

        Ok(content)
    }
}
