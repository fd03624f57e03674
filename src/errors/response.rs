use axum::{
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::Value;
use crate::errors::{AppError, ErrorCode};

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    messages: Vec<ErrorMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    error: bool,
}

/// Success envelope: `{ message, data, error: false }`.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    pub message: String,
    pub data: T,
    pub error: bool,
}

pub fn success<T: Serialize>(message: impl Into<String>, data: T) -> Json<Success<T>> {
    Json(Success {
        message: message.into(),
        data,
        error: false,
    })
}

// The IntoResponse trait implementation converts AppError into the error envelope.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("{}", self);
        }

        let details = match &self {
            AppError::Validation(messages) if messages.len() > 1 => {
                Some(serde_json::json!({ "count": messages.len() }))
            }
            _ => None,
        };

        let body = ErrorBody {
            messages: self
                .messages()
                .into_iter()
                .map(|message| ErrorMessage { code, message })
                .collect(),
            details,
            error: true,
        };

        (status, Json(body)).into_response()
    }
}
