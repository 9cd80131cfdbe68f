use super::error::TrackServiceError;
use super::{
    AudioFile, ContentResponse, GenerateContentRequest, NewAudioFile, RegisterTrackRequest,
    TrackAnalysis, TrackResponse,
};
use crate::domain::content::{ContentGenerator, GenerationRequest};
use crate::infrastructure::repositories::{
    AudioFileRepository, GeneratedContentRepository, UserRepository,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

const MAX_TRACKS_PER_USER: i64 = 500;
const MIN_BPM: i32 = 20;
const MAX_BPM: i32 = 300;

pub struct TrackService {
    audio_repo: Arc<AudioFileRepository>,
    user_repo: Arc<UserRepository>,
    content_repo: Arc<GeneratedContentRepository>,
    generator: Arc<ContentGenerator>,
}

impl TrackService {
    pub fn new(
        audio_repo: Arc<AudioFileRepository>,
        user_repo: Arc<UserRepository>,
        content_repo: Arc<GeneratedContentRepository>,
        generator: Arc<ContentGenerator>,
    ) -> Self {
        Self {
            audio_repo,
            user_repo,
            content_repo,
            generator,
        }
    }
}

#[async_trait]
pub trait TrackServiceApi: Send + Sync {
    async fn register_track(
        &self,
        user_id: Uuid,
        request: RegisterTrackRequest,
    ) -> Result<TrackResponse, TrackServiceError>;

    async fn list_tracks(&self, user_id: Uuid) -> Result<Vec<TrackResponse>, TrackServiceError>;

    async fn get_track(&self, track_id: Uuid) -> Result<TrackResponse, TrackServiceError>;

    async fn update_analysis(
        &self,
        track_id: Uuid,
        analysis: TrackAnalysis,
    ) -> Result<TrackResponse, TrackServiceError>;

    async fn delete_track(&self, track_id: Uuid) -> Result<(), TrackServiceError>;

    /// Generate promotional content for a track.
    ///
    /// The track supplies title and artist; the mood comes from the request
    /// or, failing that, from the track's stored analysis.
    async fn generate_content(
        &self,
        track_id: Uuid,
        request: GenerateContentRequest,
    ) -> Result<ContentResponse, TrackServiceError>;

    async fn list_content(&self, track_id: Uuid)
        -> Result<Vec<ContentResponse>, TrackServiceError>;
}

#[async_trait]
impl TrackServiceApi for TrackService {
    async fn register_track(
        &self,
        user_id: Uuid,
        request: RegisterTrackRequest,
    ) -> Result<TrackResponse, TrackServiceError> {
        self.ensure_user(user_id).await?;
        validate_registration(&request)?;
        validate_analysis(&TrackAnalysis {
            duration_seconds: request.duration_seconds,
            bpm: request.bpm,
            mood: request.mood.clone(),
        })?;

        let track_count = self.audio_repo.count_by_user(user_id).await?;
        if track_count >= MAX_TRACKS_PER_USER {
            return Err(TrackServiceError::Invalid(format!(
                "Track limit of {} reached",
                MAX_TRACKS_PER_USER
            )));
        }

        let new_file = NewAudioFile {
            user_id,
            title: request.title.trim().to_string(),
            artist: request.artist.trim().to_string(),
            file_name: request.file_name.trim().to_string(),
            mime_type: request.mime_type.trim().to_lowercase(),
            file_size_bytes: request.file_size_bytes,
            duration_seconds: request.duration_seconds,
            bpm: request.bpm,
            mood: request.mood.map(|m| m.trim().to_string()),
        };

        let audio_file = self.audio_repo.create(&new_file).await?;

        tracing::info!(
            user_id = %user_id,
            track_id = %audio_file.id,
            file_size_bytes = audio_file.file_size_bytes,
            "Track registered"
        );

        Ok(TrackResponse::from(audio_file))
    }

    async fn list_tracks(&self, user_id: Uuid) -> Result<Vec<TrackResponse>, TrackServiceError> {
        self.ensure_user(user_id).await?;

        let files = self.audio_repo.find_by_user(user_id).await?;
        Ok(files.into_iter().map(TrackResponse::from).collect())
    }

    async fn get_track(&self, track_id: Uuid) -> Result<TrackResponse, TrackServiceError> {
        let track = self.find_track(track_id).await?;
        Ok(TrackResponse::from(track))
    }

    async fn update_analysis(
        &self,
        track_id: Uuid,
        analysis: TrackAnalysis,
    ) -> Result<TrackResponse, TrackServiceError> {
        validate_analysis(&analysis)?;

        let analysis = TrackAnalysis {
            mood: analysis.mood.map(|m| m.trim().to_string()),
            ..analysis
        };

        let track = self
            .audio_repo
            .update_analysis(track_id, &analysis)
            .await?
            .ok_or(TrackServiceError::NotFound("Track"))?;

        Ok(TrackResponse::from(track))
    }

    async fn delete_track(&self, track_id: Uuid) -> Result<(), TrackServiceError> {
        if !self.audio_repo.delete(track_id).await? {
            return Err(TrackServiceError::NotFound("Track"));
        }
        Ok(())
    }

    async fn generate_content(
        &self,
        track_id: Uuid,
        request: GenerateContentRequest,
    ) -> Result<ContentResponse, TrackServiceError> {
        let track = self.find_track(track_id).await?;

        let mood = resolve_mood(request.mood.as_deref(), track.mood.as_deref()).ok_or_else(|| {
            TrackServiceError::Invalid(
                "A mood is required: set one on the track or pass it in the request".to_string(),
            )
        })?;

        let generation_request =
            GenerationRequest::new(request.kind, &track.title, &track.artist, mood);

        let payload = self
            .generator
            .generate(&generation_request)
            .await
            .ok_or(TrackServiceError::GenerationUnavailable)?;

        let body = payload
            .to_json()
            .map_err(|e| TrackServiceError::Other(e.into()))?;

        if !request.persist {
            return Ok(ContentResponse {
                id: None,
                kind: payload.kind(),
                payload: body,
                created_at: None,
            });
        }

        let stored = self
            .content_repo
            .replace_for_audio_file(track.user_id, track.id, payload.kind(), &body)
            .await?;

        tracing::info!(
            track_id = %track.id,
            content_id = %stored.id,
            kind = %stored.content_type,
            "Generated content stored"
        );

        Ok(ContentResponse::from(stored))
    }

    async fn list_content(
        &self,
        track_id: Uuid,
    ) -> Result<Vec<ContentResponse>, TrackServiceError> {
        self.find_track(track_id).await?;

        let contents = self.content_repo.find_by_audio_file(track_id).await?;
        Ok(contents.into_iter().map(ContentResponse::from).collect())
    }
}

impl TrackService {
    async fn ensure_user(&self, user_id: Uuid) -> Result<(), TrackServiceError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .map(|_| ())
            .ok_or(TrackServiceError::NotFound("User"))
    }

    async fn find_track(&self, track_id: Uuid) -> Result<AudioFile, TrackServiceError> {
        self.audio_repo
            .find_by_id(track_id)
            .await?
            .ok_or(TrackServiceError::NotFound("Track"))
    }
}

/// A non-blank mood from the request wins over the one stored on the track
fn resolve_mood<'a>(requested: Option<&'a str>, stored: Option<&'a str>) -> Option<&'a str> {
    let non_blank = |m: &'a str| Some(m.trim()).filter(|m| !m.is_empty());
    requested
        .and_then(non_blank)
        .or_else(|| stored.and_then(non_blank))
}

fn validate_registration(request: &RegisterTrackRequest) -> Result<(), TrackServiceError> {
    for (field, value) in [
        ("title", &request.title),
        ("artist", &request.artist),
        ("file_name", &request.file_name),
    ] {
        if value.trim().is_empty() {
            return Err(TrackServiceError::Invalid(format!(
                "{} cannot be empty",
                field
            )));
        }
    }

    if !request.mime_type.trim().to_lowercase().starts_with("audio/") {
        return Err(TrackServiceError::Invalid(format!(
            "Unsupported mime type: {}",
            request.mime_type
        )));
    }

    if request.file_size_bytes <= 0 {
        return Err(TrackServiceError::Invalid(
            "file_size_bytes must be positive".to_string(),
        ));
    }

    Ok(())
}

fn validate_analysis(analysis: &TrackAnalysis) -> Result<(), TrackServiceError> {
    if let Some(bpm) = analysis.bpm {
        if !(MIN_BPM..=MAX_BPM).contains(&bpm) {
            return Err(TrackServiceError::Invalid(format!(
                "bpm must be between {} and {}",
                MIN_BPM, MAX_BPM
            )));
        }
    }

    if let Some(duration) = analysis.duration_seconds {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(TrackServiceError::Invalid(
                "duration_seconds must be positive".to_string(),
            ));
        }
    }

    if let Some(mood) = &analysis.mood {
        if mood.trim().is_empty() {
            return Err(TrackServiceError::Invalid("mood cannot be empty".to_string()));
        }
    }

    Ok(())
}
