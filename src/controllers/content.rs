use axum::{extract::State, Json};
use std::sync::Arc;

use crate::domain::content::{ContentGenerator, GeneratedPayload, GenerationRequest};
use crate::error::{AppError, AppResult};

pub struct ContentController {
    generator: Arc<ContentGenerator>,
}

impl ContentController {
    pub fn new(generator: Arc<ContentGenerator>) -> Self {
        Self { generator }
    }

    /// POST /api/content/generate - Stateless generation, nothing is stored
    pub async fn generate(
        State(controller): State<Arc<ContentController>>,
        Json(request): Json<GenerationRequest>,
    ) -> AppResult<Json<GeneratedPayload>> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        controller
            .generator
            .generate(&request)
            .await
            .map(Json)
            .ok_or_else(|| {
                AppError::ServiceUnavailable(
                    "Content generation is unavailable, try again later".to_string(),
                )
            })
    }
}
