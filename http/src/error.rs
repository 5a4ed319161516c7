use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use translator_application::ApplicationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    Validation { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl HttpError {
    pub fn validation(message: impl Into<String>) -> Self {
        HttpError::Validation {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::Validation { .. } => StatusCode::BAD_REQUEST,
            HttpError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            HttpError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            HttpError::Validation { message }
            | HttpError::Unavailable { message }
            | HttpError::Internal { message } => message,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            Json(json!({
                "success": false,
                "error": self.message(),
            })),
        )
            .into_response()
    }
}

impl From<ApplicationError> for HttpError {
    fn from(error: ApplicationError) -> Self {
        match error {
            ApplicationError::Validation(message)
            | ApplicationError::UnrecognizedContent(message) => HttpError::Validation { message },
            ApplicationError::UpstreamUnavailable(message) => HttpError::Unavailable { message },
            ApplicationError::UpstreamFault(message) | ApplicationError::Unexpected(message) => {
                HttpError::Internal { message }
            }
        }
    }
}
