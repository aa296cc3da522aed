use crate::validation::ValidationErrors;
use thiserror::Error;

/// Everything a console action can fail with. Each variant maps to one
/// user-visible message; nothing is retried automatically.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No bearer token in the session. Raised before any request is sent.
    #[error("not authenticated")]
    Unauthenticated,

    #[error("session expired")]
    SessionExpired,

    /// 401 on a call made without a token, i.e. the login itself.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("session storage error: {0}")]
    Storage(String),

    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Classify a non-2xx status.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 => ApiError::SessionExpired,
            403 => ApiError::Forbidden(body),
            404 => ApiError::NotFound(body),
            500 => ApiError::Server(body),
            _ => ApiError::Http { status, body },
        }
    }

    /// Failures after which the UI offers a manual retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Network(_) | ApiError::Server(_) | ApiError::Http { .. }
        )
    }

    /// Text for the alert dialog or inline banner.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthenticated => "You are not logged in. Please sign in.".to_string(),
            ApiError::SessionExpired => "Your session has expired. Please sign in again.".to_string(),
            ApiError::InvalidCredentials => "Wrong username or password.".to_string(),
            ApiError::Forbidden(_) => "You do not have permission for this operation.".to_string(),
            ApiError::NotFound(_) => "The requested resource was not found.".to_string(),
            ApiError::Server(_) => "Server error. Please try again later.".to_string(),
            ApiError::Http { status, .. } => format!("Request failed (HTTP {}).", status),
            ApiError::Network(_) => "Could not reach the server. Check your connection.".to_string(),
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
            ApiError::Storage(_) => "Local session storage is unavailable.".to_string(),
            ApiError::Validation(errors) => errors.summary(),
            ApiError::Config(msg) => format!("Configuration error: {}", msg),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        ApiError::Validation(e)
    }
}
