//! Minimal configuration module for the interview client core
//!
//! Only exports pure data types. All loading logic is in CLI layer.

pub mod types;

pub use types::{
    ApiPaths, ResolvedClientConfig, DEFAULT_BASE_URL, DEFAULT_INTERVIEW_PATH, DEFAULT_UPLOAD_PATH,
};
