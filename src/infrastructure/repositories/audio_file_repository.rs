use crate::domain::track::{AudioFile, NewAudioFile, TrackAnalysis};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use std::sync::Arc;
use uuid::Uuid;

pub struct AudioFileRepository {
    pool: Arc<DbPool>,
}

impl AudioFileRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_file: &NewAudioFile) -> AppResult<AudioFile> {
        let pool = self.pool.as_ref();

        let audio_file = sqlx::query_as::<_, AudioFile>(
            r#"
            INSERT INTO audio_files (
                id, user_id, title, artist, file_name, mime_type,
                file_size_bytes, duration_seconds, bpm, mood, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_file.user_id)
        .bind(&new_file.title)
        .bind(&new_file.artist)
        .bind(&new_file.file_name)
        .bind(&new_file.mime_type)
        .bind(new_file.file_size_bytes)
        .bind(new_file.duration_seconds)
        .bind(new_file.bpm)
        .bind(&new_file.mood)
        .bind(chrono::Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(audio_file)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AudioFile>> {
        let pool = self.pool.as_ref();
        let audio_file = sqlx::query_as::<_, AudioFile>("SELECT * FROM audio_files WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(audio_file)
    }

    /// All audio files owned by a user, newest first
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<AudioFile>> {
        let pool = self.pool.as_ref();
        let audio_files = sqlx::query_as::<_, AudioFile>(
            r#"
            SELECT * FROM audio_files
            WHERE user_id = $1
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(audio_files)
    }

    pub async fn update_analysis(
        &self,
        id: Uuid,
        analysis: &TrackAnalysis,
    ) -> AppResult<Option<AudioFile>> {
        let pool = self.pool.as_ref();

        let audio_file = sqlx::query_as::<_, AudioFile>(
            r#"
            UPDATE audio_files
            SET duration_seconds = COALESCE($1, duration_seconds),
                bpm = COALESCE($2, bpm),
                mood = COALESCE($3, mood)
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(analysis.duration_seconds)
        .bind(analysis.bpm)
        .bind(&analysis.mood)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(audio_file)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query("DELETE FROM audio_files WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_by_user(&self, user_id: Uuid) -> AppResult<i64> {
        let pool = self.pool.as_ref();
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM audio_files WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        Ok(count.0)
    }
}
