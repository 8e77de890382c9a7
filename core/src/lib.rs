//! # interview-core
//!
//! Client library for a remote interview service.
//!
//! The service conducts a staged interview: it opens a session, asks
//! questions, scores each candidate response and produces a summary once the
//! interview closes. This crate owns the client side of that protocol: the
//! session state machine, the transcript, and the HTTP client that talks to
//! the service.

// Core modules
pub mod api;
pub mod config;
pub mod error;
pub mod interview;
pub mod output;
pub mod recording;
pub mod session;
pub mod speech;

// Re-export commonly used types
pub use api::{HttpInterviewApi, InterviewApi, ResumeUpload};
pub use config::{ApiPaths, ResolvedClientConfig};
pub use error::{Error, Result};
pub use interview::{Evaluation, Message, Role, ScoreBand, Stage, Summary, Transcript};
pub use recording::TranscriptRecorder;
pub use session::{EndReason, InterviewSession, RespondOutcome, SessionBuilder, SessionState, Turn};

/// Current version of the interview-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the library
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Initialize tracing with a specific debug mode
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
