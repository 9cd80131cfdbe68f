use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::track::{
    ContentResponse, GenerateContentRequest, TrackAnalysis, TrackResponse, TrackService,
    TrackServiceApi,
};
use crate::error::AppResult;

pub struct TrackController {
    track_service: Arc<TrackService>,
}

impl TrackController {
    pub fn new(track_service: Arc<TrackService>) -> Self {
        Self { track_service }
    }

    /// GET /api/tracks/{trackId}
    pub async fn get_track(
        State(controller): State<Arc<TrackController>>,
        Path(track_id): Path<Uuid>,
    ) -> AppResult<Json<TrackResponse>> {
        let track = controller.track_service.get_track(track_id).await?;
        Ok(Json(track))
    }

    /// PATCH /api/tracks/{trackId} - Store analysis results
    pub async fn update_track(
        State(controller): State<Arc<TrackController>>,
        Path(track_id): Path<Uuid>,
        Json(analysis): Json<TrackAnalysis>,
    ) -> AppResult<Json<TrackResponse>> {
        let track = controller
            .track_service
            .update_analysis(track_id, analysis)
            .await?;
        Ok(Json(track))
    }

    /// DELETE /api/tracks/{trackId}
    pub async fn delete_track(
        State(controller): State<Arc<TrackController>>,
        Path(track_id): Path<Uuid>,
    ) -> AppResult<StatusCode> {
        controller.track_service.delete_track(track_id).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// POST /api/tracks/{trackId}/content - Generate promo content for the track
    pub async fn generate_content(
        State(controller): State<Arc<TrackController>>,
        Path(track_id): Path<Uuid>,
        Json(request): Json<GenerateContentRequest>,
    ) -> AppResult<Json<ContentResponse>> {
        let content = controller
            .track_service
            .generate_content(track_id, request)
            .await?;
        Ok(Json(content))
    }

    /// GET /api/tracks/{trackId}/content
    pub async fn list_content(
        State(controller): State<Arc<TrackController>>,
        Path(track_id): Path<Uuid>,
    ) -> AppResult<Json<Vec<ContentResponse>>> {
        let contents = controller.track_service.list_content(track_id).await?;
        Ok(Json(contents))
    }
}
