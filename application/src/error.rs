use thiserror::Error;

/// Outcome kinds surfaced to clients. `Display` is the client-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    UnrecognizedContent(String),

    #[error("{0}")]
    UpstreamUnavailable(String),

    #[error("{0}")]
    UpstreamFault(String),

    #[error("{0}")]
    Unexpected(String),
}

impl ApplicationError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn file_too_large(max_upload_bytes: usize) -> Self {
        Self::Validation(format!(
            "File too large. Maximum size is {}",
            format_size(max_upload_bytes)
        ))
    }

    pub fn unexpected() -> Self {
        Self::Unexpected("Internal server error".to_string())
    }

    pub fn message(&self) -> &str {
        match self {
            ApplicationError::Validation(message)
            | ApplicationError::UnrecognizedContent(message)
            | ApplicationError::UpstreamUnavailable(message)
            | ApplicationError::UpstreamFault(message)
            | ApplicationError::Unexpected(message) => message,
        }
    }
}

fn format_size(bytes: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * KIB;
    match bytes {
        b if b >= MIB && b % MIB == 0 => format!("{}MB", b / MIB),
        b if b >= MIB => format!("{:.1}MB", b as f64 / MIB as f64),
        b if b >= KIB && b % KIB == 0 => format!("{}KB", b / KIB),
        b if b >= KIB => format!("{:.1}KB", b as f64 / KIB as f64),
        b => format!("{b} bytes"),
    }
}
