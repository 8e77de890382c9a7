//! Client configuration types
//!
//! Core only accepts fully resolved, validated configuration.
//! All discovery, loading, and merging happens in CLI layer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default address of a locally running interview service
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default prefix for the start/respond/summary/end routes
pub const DEFAULT_INTERVIEW_PATH: &str = "/api/interview";

/// Default route for resume uploads
pub const DEFAULT_UPLOAD_PATH: &str = "/api/v1/interview/upload-resume";

/// Route layout of the interview service
///
/// The service exposes its conversation routes and its upload route under
/// different prefixes, so both are configured independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiPaths {
    /// Prefix for `start`, `respond`, `{id}/summary` and `{id}`
    #[serde(default = "default_interview_path")]
    pub interview: String,
    /// Full path of the multipart resume upload route
    #[serde(default = "default_upload_path")]
    pub upload_resume: String,
}

fn default_interview_path() -> String {
    DEFAULT_INTERVIEW_PATH.to_string()
}

fn default_upload_path() -> String {
    DEFAULT_UPLOAD_PATH.to_string()
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self {
            interview: default_interview_path(),
            upload_resume: default_upload_path(),
        }
    }
}

/// A fully resolved client configuration ready for use by core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedClientConfig {
    /// Scheme, host and optional deployment prefix of the service
    pub base_url: String,
    /// Route layout
    #[serde(default)]
    pub paths: ApiPaths,
    /// Additional headers for requests
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// External text-to-speech command, if any
    #[serde(default)]
    pub speech_command: Option<String>,
}

impl ResolvedClientConfig {
    /// Create a new resolved config with default routes
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            paths: ApiPaths::default(),
            headers: HashMap::new(),
            speech_command: None,
        }
    }

    /// Set the route layout
    pub fn with_paths(mut self, paths: ApiPaths) -> Self {
        self.paths = paths;
        self
    }

    /// Add a header
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Add multiple headers
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Set the text-to-speech command
    pub fn with_speech_command(mut self, command: Option<String>) -> Self {
        self.speech_command = command;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("Base URL cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("Base URL must start with http:// or https://".to_string());
        }

        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!("Base URL is not a valid URL: {}", self.base_url));
        }

        for (field, path) in [
            ("interview", &self.paths.interview),
            ("upload_resume", &self.paths.upload_resume),
        ] {
            if !path.starts_with('/') {
                return Err(format!("Path '{}' must start with '/': {}", field, path));
            }
        }

        if let Some(command) = &self.speech_command {
            if command.trim().is_empty() {
                return Err("Speech command cannot be blank".to_string());
            }
        }

        Ok(())
    }
}

impl Default for ResolvedClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL.to_string())
    }
}
