//! CLI-specific output implementations
//!
//! Concrete implementations of the session output abstraction for the
//! terminal: colored evaluation cards and summaries.

pub mod cli_handler;
pub mod formatters;

pub use cli_handler::CliOutputHandler;
