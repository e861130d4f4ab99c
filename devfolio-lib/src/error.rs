use thiserror::Error;

/// Failure taxonomy shared by every storage backend.
///
/// The core never retries: each provider operation either resolves with a
/// value or fails with one of these kinds, and the consuming layer decides
/// how to present it.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Backend selected but required connection parameters are missing or
    /// invalid. Raised on first provider use, not at selection time.
    #[error("backend configuration invalid: {0}")]
    Configuration(String),
    /// Read/write/reset against the storage medium failed (network, auth,
    /// quota, or malformed document).
    #[error("persistence failure: {0}")]
    Persistence(String),
    /// Caller-side guard failed (password too short, mismatch, wrong
    /// password). Never persisted as error state.
    #[error("validation failed: {0}")]
    Validation(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Persistence(format!("malformed document: {err}"))
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Persistence(err.to_string())
    }
}
