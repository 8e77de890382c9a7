//! Error types and handling for the interview client core

use thiserror::Error;

/// Result type alias for interview client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the interview client core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Interview service errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Session lifecycle violations
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Transcript recording errors
    #[error("Recording error: {0}")]
    Recording(#[from] RecordingError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint URL errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },
}

/// Interview service errors
///
/// The service has no structured error codes, so every non-2xx answer is a
/// `Status` carrying whatever body text came back.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Request failed: {status} - {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },
}

/// Session state machine violations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("No interview session has been started")]
    NotStarted,

    #[error("An interview session is already established: {session_id}")]
    AlreadyStarted { session_id: String },

    #[error("Interview session {session_id} has ended")]
    Ended { session_id: String },

    #[error("Response text cannot be empty")]
    EmptyResponse,

    #[error("Summary is no longer available for session {session_id}")]
    SummaryUnavailable { session_id: String },
}

/// Transcript recording errors
#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("Failed to record transcript: {message}")]
    RecordingFailed { message: String },

    #[error("Failed to load recording: {path}")]
    LoadFailed { path: String },

    #[error("Invalid recording format")]
    InvalidFormat,
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Generic(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Generic(msg.to_string())
    }
}

impl Error {
    /// The session error behind this error, if any
    pub fn as_session_error(&self) -> Option<&SessionError> {
        match self {
            Error::Session(err) => Some(err),
            _ => None,
        }
    }
}
