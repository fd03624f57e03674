use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    // The provider answered with a non-success status
    #[error("Provider responded with {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("No response from external API: {0}")]
    NoResponse(String),

    #[error("Failed to fetch articles: {0}")]
    Failure(String),
}

impl ProviderError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProviderError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProviderError::NoResponse(_) | ProviderError::Failure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn client_message(&self) -> String {
        match self {
            ProviderError::Upstream { message, .. } => message.clone(),
            ProviderError::NoResponse(_) => "No response from external API".to_string(),
            ProviderError::Failure(_) => "Failed to fetch articles".to_string(),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            ProviderError::NoResponse(err.to_string())
        } else {
            ProviderError::Failure(err.to_string())
        }
    }
}
