use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::track::{RegisterTrackRequest, TrackResponse, TrackService, TrackServiceApi};
use crate::domain::user::{
    CreateUserRequest, UpdateUserRequest, UserResponse, UserService, UserServiceApi,
};
use crate::error::AppResult;

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub struct UserController {
    user_service: Arc<UserService>,
    track_service: Arc<TrackService>,
}

impl UserController {
    pub fn new(user_service: Arc<UserService>, track_service: Arc<TrackService>) -> Self {
        Self {
            user_service,
            track_service,
        }
    }

    /// POST /api/users - Register a user
    pub async fn create_user(
        State(controller): State<Arc<UserController>>,
        Json(request): Json<CreateUserRequest>,
    ) -> AppResult<(StatusCode, Json<UserResponse>)> {
        let user = controller.user_service.register(request).await?;
        Ok((StatusCode::CREATED, Json(user)))
    }

    /// GET /api/users - List users
    pub async fn list_users(
        State(controller): State<Arc<UserController>>,
        Query(query): Query<ListUsersQuery>,
    ) -> AppResult<Json<Vec<UserResponse>>> {
        let users = controller
            .user_service
            .list_users(query.limit, query.offset)
            .await?;
        Ok(Json(users))
    }

    /// GET /api/users/{userId}
    pub async fn get_user(
        State(controller): State<Arc<UserController>>,
        Path(user_id): Path<Uuid>,
    ) -> AppResult<Json<UserResponse>> {
        let user = controller.user_service.get_user(user_id).await?;
        Ok(Json(user))
    }

    /// PATCH /api/users/{userId} - Change display name
    pub async fn update_user(
        State(controller): State<Arc<UserController>>,
        Path(user_id): Path<Uuid>,
        Json(request): Json<UpdateUserRequest>,
    ) -> AppResult<Json<UserResponse>> {
        let user = controller.user_service.rename(user_id, request).await?;
        Ok(Json(user))
    }

    /// DELETE /api/users/{userId} - Delete user and everything they own
    pub async fn delete_user(
        State(controller): State<Arc<UserController>>,
        Path(user_id): Path<Uuid>,
    ) -> AppResult<StatusCode> {
        controller.user_service.delete_user(user_id).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// POST /api/users/{userId}/tracks - Register an audio file
    pub async fn create_track(
        State(controller): State<Arc<UserController>>,
        Path(user_id): Path<Uuid>,
        Json(request): Json<RegisterTrackRequest>,
    ) -> AppResult<(StatusCode, Json<TrackResponse>)> {
        let track = controller
            .track_service
            .register_track(user_id, request)
            .await?;
        Ok((StatusCode::CREATED, Json(track)))
    }

    /// GET /api/users/{userId}/tracks
    pub async fn list_tracks(
        State(controller): State<Arc<UserController>>,
        Path(user_id): Path<Uuid>,
    ) -> AppResult<Json<Vec<TrackResponse>>> {
        let tracks = controller.track_service.list_tracks(user_id).await?;
        Ok(Json(tracks))
    }
}
