use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Rate limited by upstream (HTTP 429)")]
    RateLimited,

    #[error("Upstream service unavailable (HTTP 503)")]
    ServiceUnavailable,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Upstream returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request scheduler is not running")]
    SchedulerClosed,
}

impl DomainError {
    /// Maps a non-success HTTP status onto the error taxonomy.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            429 => DomainError::RateLimited,
            503 => DomainError::ServiceUnavailable,
            _ => DomainError::Upstream {
                status,
                message: message.into(),
            },
        }
    }

    /// Whether a failed attempt is worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::RateLimited | DomainError::ServiceUnavailable | DomainError::Transport(_)
        )
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Decode(e.to_string())
    }
}
