use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TrackServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("content generation unavailable")]
    GenerationUnavailable,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for TrackServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => TrackServiceError::Invalid(msg),
            AppError::NotFound(_) => TrackServiceError::NotFound("Track"),
            AppError::ServiceUnavailable(_) => TrackServiceError::GenerationUnavailable,
            _ => TrackServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<TrackServiceError> for AppError {
    fn from(err: TrackServiceError) -> Self {
        match err {
            TrackServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TrackServiceError::NotFound(what) => AppError::NotFound(format!("{} not found", what)),
            TrackServiceError::GenerationUnavailable => AppError::ServiceUnavailable(
                "Content generation is unavailable, try again later".to_string(),
            ),
            TrackServiceError::Dependency(msg) => AppError::Internal(msg),
            TrackServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
