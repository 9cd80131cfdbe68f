/// Reasons a generation call produced no content.
///
/// These never reach callers of the generator; they are logged and collapsed
/// into `None`.
#[derive(Debug, thiserror::Error)]
pub enum GenerationFailure {
    #[error("content provider credential is not configured")]
    MissingCredential,
    #[error("invalid generation request, missing: {0}")]
    InvalidInput(String),
    #[error("content provider call failed: {0}")]
    TransportFault(String),
    #[error("content provider returned an empty response")]
    EmptyResponse,
    #[error("malformed content payload: {0}")]
    MalformedResponse(String),
}

impl GenerationFailure {
    /// Stable label used as the `failure` field in log events
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::InvalidInput(_) => "invalid_input",
            Self::TransportFault(_) => "transport_fault",
            Self::EmptyResponse => "empty_response",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }
}
