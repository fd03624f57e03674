// Typed errors for the API layer and the services behind it, built on thiserror.
use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

pub mod provider;
pub mod response;
pub mod store;

pub use provider::ProviderError;
pub use response::{success, Success};
pub use store::{StoreError, StoreResult};

/// Stable codes carried in every error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    ConflictError,
    HashError,
    AuthenticationError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::ConflictError => "CONFLICT_ERROR",
            ErrorCode::HashError => "HASH_ERROR",
            ErrorCode::AuthenticationError => "AUTHENTICATION_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::ConflictError => StatusCode::CONFLICT,
            ErrorCode::HashError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::AuthenticationError => StatusCode::UNAUTHORIZED,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    // One message per failing field
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Conflict error: {0}")]
    Conflict(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(vec![message.into()])
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::Conflict(_) => ErrorCode::ConflictError,
            AppError::Hash(_) => ErrorCode::HashError,
            AppError::Auth(_) => ErrorCode::AuthenticationError,
            AppError::Internal(_) | AppError::Store(_) | AppError::Provider(_) => {
                ErrorCode::InternalError
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Provider(err) => err.status(),
            other => other.code().status(),
        }
    }

    /// Messages shown to the client. Store failures never leak their cause.
    pub fn messages(&self) -> Vec<String> {
        match self {
            AppError::Validation(messages) => messages.clone(),
            AppError::Conflict(msg)
            | AppError::Hash(msg)
            | AppError::Auth(msg)
            | AppError::Internal(msg) => vec![msg.clone()],
            AppError::Store(_) => vec!["Internal server error".to_string()],
            AppError::Provider(err) => vec![err.client_message()],
        }
    }
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
