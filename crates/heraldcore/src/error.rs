use thiserror::Error;

/// Failure reported by the messaging platform for an outbound request.
///
/// The adapter crate maps its client errors onto these variants so the
/// conversation engine can tell a rejected request (bad user id, bot blocked,
/// missing permission) apart from everything else.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform answered and refused the request
    #[error("{0}")]
    Rejected(String),

    /// The request never got a usable answer
    #[error("network error: {0}")]
    Network(String),

    #[error("{0}")]
    Other(String),
}

/// Centralized error types for the core library
///
/// Every fallible core operation returns [`AppResult`]. Handlers propagate
/// with `?` and the conversation runtime decides how the user sees it.
#[derive(Error, Debug)]
pub enum AppError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or unwritable JSON data file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV export errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Outbound platform request failed
    #[error("{0}")]
    Platform(#[from] PlatformError),

    /// No category with the given id in the active locale
    #[error("category {0} not found")]
    CategoryNotFound(String),

    /// A wizard step ran without the scratch value an earlier step stores
    #[error("conversation data missing: {0}")]
    MissingScratch(&'static str),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// True when the platform itself refused the request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, AppError::Platform(PlatformError::Rejected(_)))
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
