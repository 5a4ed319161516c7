use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("speech could not be recognized")]
    UnrecognizedSpeech,

    #[error("{service} service unavailable: {message}")]
    ServiceUnavailable { service: String, message: String },

    #[error("{service} service error: {message}")]
    ExternalService { service: String, message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn service_unavailable(service: &str, message: &str) -> Self {
        Self::ServiceUnavailable {
            service: service.to_string(),
            message: message.to_string(),
        }
    }

    pub fn external_service_error(service: &str, message: &str) -> Self {
        Self::ExternalService {
            service: service.to_string(),
            message: message.to_string(),
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self::Internal(message.to_string())
    }

    /// Underlying cause without the service prefix.
    pub fn detail(&self) -> String {
        match self {
            DomainError::ServiceUnavailable { message, .. }
            | DomainError::ExternalService { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
