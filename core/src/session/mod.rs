//! Interview session lifecycle

pub mod builder;
pub mod controller;
pub mod state;

pub use builder::SessionBuilder;
pub use controller::{InterviewSession, RespondOutcome, Turn};
pub use state::{EndReason, SessionState};
