//! Simple CLI configuration loader for the interview client
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./interview.json or ./.interview/config.json
//! 3. XDG config: $XDG_CONFIG_HOME/interview/config.json or ~/.config/interview/config.json
//! 4. Environment variables only (no files)
//! 5. Built-in defaults

use anyhow::{anyhow, Context, Result};
use interview_core::config::{
    ApiPaths, ResolvedClientConfig, DEFAULT_BASE_URL, DEFAULT_INTERVIEW_PATH, DEFAULT_UPLOAD_PATH,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Raw configuration file format (simple single-file schema)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConfig {
    /// Service base URL, e.g. http://localhost:8000
    pub base_url: Option<String>,
    /// Prefix of the conversation routes
    pub interview_path: Option<String>,
    /// Path of the resume upload route
    pub upload_path: Option<String>,
    /// External text-to-speech command
    pub speech_command: Option<String>,
    /// Additional headers (values can be "env:VAR_NAME")
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// CLI configuration loader
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    base_url_override: Option<String>,
    interview_path_override: Option<String>,
    upload_path_override: Option<String>,
    speech_command_override: Option<String>,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            config_override: None,
            base_url_override: None,
            interview_path_override: None,
            upload_path_override: None,
            speech_command_override: None,
        }
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set base URL override
    pub fn with_base_url_override(mut self, base_url: String) -> Self {
        self.base_url_override = Some(base_url);
        self
    }

    /// Set interview route prefix override
    pub fn with_interview_path_override(mut self, path: String) -> Self {
        self.interview_path_override = Some(path);
        self
    }

    /// Set upload route override
    pub fn with_upload_path_override(mut self, path: String) -> Self {
        self.upload_path_override = Some(path);
        self
    }

    /// Set speech command override
    pub fn with_speech_command_override(mut self, command: String) -> Self {
        self.speech_command_override = Some(command);
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<ResolvedClientConfig> {
        // Step 1: Find and load base configuration
        let config = if let Some(override_path) = &self.config_override {
            let path = expand_path(override_path);
            self.load_from_path(&path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else {
            self.search_and_load().await?
        };

        // Step 2: Apply flag overrides
        let config = self.apply_overrides(config);

        // Step 3: Resolve to final client config
        resolve_config(config)
    }

    fn apply_overrides(&self, mut config: RawConfig) -> RawConfig {
        if let Some(base_url) = &self.base_url_override {
            config.base_url = Some(base_url.clone());
        }
        if let Some(path) = &self.interview_path_override {
            config.interview_path = Some(path.clone());
        }
        if let Some(path) = &self.upload_path_override {
            config.upload_path = Some(path.clone());
        }
        if let Some(command) = &self.speech_command_override {
            config.speech_command = Some(command.clone());
        }
        config
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<RawConfig> {
        // 1. Current working directory
        let cwd = std::env::current_dir()?;
        if let Some(config) = self.try_load_dir(&cwd).await? {
            return Ok(config);
        }

        // 2. XDG config directory
        if let Some(config) = self.try_load_xdg().await? {
            return Ok(config);
        }

        // 3. Environment variables only
        Ok(self.load_env_only())
    }

    /// Try loading ./interview.json or ./.interview/config.json from a directory
    async fn try_load_dir(&self, dir: &Path) -> Result<Option<RawConfig>> {
        let interview_json = dir.join("interview.json");
        if interview_json.exists() {
            return Ok(Some(self.load_file(&interview_json).await?));
        }

        let dir_config = dir.join(".interview").join("config.json");
        if dir_config.exists() {
            return Ok(Some(self.load_file(&dir_config).await?));
        }

        Ok(None)
    }

    /// Try loading from XDG config directory
    async fn try_load_xdg(&self) -> Result<Option<RawConfig>> {
        if let Some(config_dir) = self.get_xdg_config_dir() {
            let config_path = config_dir.join("interview").join("config.json");
            if config_path.exists() {
                return Ok(Some(self.load_file(&config_path).await?));
            }
        }
        Ok(None)
    }

    /// Build configuration from environment variables alone
    fn load_env_only(&self) -> RawConfig {
        debug!("No config file found, using environment");
        RawConfig {
            base_url: std::env::var("INTERVIEW_BASE_URL").ok(),
            interview_path: std::env::var("INTERVIEW_PATH").ok(),
            upload_path: std::env::var("INTERVIEW_UPLOAD_PATH").ok(),
            speech_command: std::env::var("INTERVIEW_SPEECH_COMMAND").ok(),
            headers: HashMap::new(),
        }
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<RawConfig> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<RawConfig> {
        debug!("Loading config from {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get XDG config directory
    fn get_xdg_config_dir(&self) -> Option<PathBuf> {
        match std::env::var("XDG_CONFIG_HOME") {
            Ok(xdg_config) if !xdg_config.is_empty() => Some(PathBuf::from(xdg_config)),
            _ => dirs::config_dir(),
        }
    }
}

impl Default for CliConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve raw config to ResolvedClientConfig
fn resolve_config(config: RawConfig) -> Result<ResolvedClientConfig> {
    let paths = ApiPaths {
        interview: config
            .interview_path
            .unwrap_or_else(|| DEFAULT_INTERVIEW_PATH.to_string()),
        upload_resume: config
            .upload_path
            .unwrap_or_else(|| DEFAULT_UPLOAD_PATH.to_string()),
    };

    // Resolve header values (handle env: prefix)
    let mut headers = HashMap::new();
    for (name, value) in config.headers {
        let value = match value.strip_prefix("env:") {
            Some(var_name) => std::env::var(var_name).with_context(|| {
                format!(
                    "Environment variable not found for header {}: {}",
                    name, var_name
                )
            })?,
            None => value,
        };
        headers.insert(name, value);
    }

    let resolved = ResolvedClientConfig::new(
        config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
    )
    .with_paths(paths)
    .with_headers(headers)
    .with_speech_command(config.speech_command.filter(|c| !c.trim().is_empty()));

    resolved
        .validate()
        .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

    Ok(resolved)
}

/// Expand `~` and environment variables in a user supplied path
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_from_file_applies_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interview.json");
        tokio::fs::write(&path, r#"{"base_url": "http://interview.test:9000"}"#)
            .await
            .unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(path)
            .load()
            .await
            .unwrap();

        assert_eq!(config.base_url, "http://interview.test:9000");
        assert_eq!(config.paths, ApiPaths::default());
        assert!(config.speech_command.is_none());
    }

    #[tokio::test]
    async fn test_directory_override_reads_config_json() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(
            dir.path().join("config.json"),
            r#"{"interview_path": "/v2/interview", "upload_path": "/v2/upload"}"#,
        )
        .await
        .unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(dir.path().to_path_buf())
            .load()
            .await
            .unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.paths.interview, "/v2/interview");
        assert_eq!(config.paths.upload_resume, "/v2/upload");
    }

    #[tokio::test]
    async fn test_flag_overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(
            &path,
            r#"{"base_url": "http://file.test", "speech_command": "say"}"#,
        )
        .await
        .unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(path)
            .with_base_url_override("http://flag.test".to_string())
            .with_upload_path_override("/upload".to_string())
            .with_speech_command_override("espeak".to_string())
            .load()
            .await
            .unwrap();

        assert_eq!(config.base_url, "http://flag.test");
        assert_eq!(config.paths.upload_resume, "/upload");
        assert_eq!(config.paths.interview, DEFAULT_INTERVIEW_PATH);
        assert_eq!(config.speech_command.as_deref(), Some("espeak"));
    }

    #[tokio::test]
    async fn test_missing_override_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = CliConfigLoader::new()
            .with_config_override(dir.path().join("nope.json"))
            .load()
            .await;
        assert!(result.is_err());

        let empty_dir = CliConfigLoader::new()
            .with_config_override(dir.path().to_path_buf())
            .load()
            .await;
        assert!(empty_dir.is_err());
    }

    #[tokio::test]
    async fn test_invalid_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let err = CliConfigLoader::new()
            .with_config_override(path)
            .load()
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }

    #[tokio::test]
    async fn test_try_load_dir_prefers_interview_json() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::create_dir_all(dir.path().join(".interview"))
            .await
            .unwrap();
        tokio::fs::write(
            dir.path().join(".interview").join("config.json"),
            r#"{"base_url": "http://nested.test"}"#,
        )
        .await
        .unwrap();

        let loader = CliConfigLoader::new();
        let nested = loader.try_load_dir(dir.path()).await.unwrap().unwrap();
        assert_eq!(nested.base_url.as_deref(), Some("http://nested.test"));

        tokio::fs::write(
            dir.path().join("interview.json"),
            r#"{"base_url": "http://top.test"}"#,
        )
        .await
        .unwrap();
        let top = loader.try_load_dir(dir.path()).await.unwrap().unwrap();
        assert_eq!(top.base_url.as_deref(), Some("http://top.test"));

        let empty = tempfile::tempdir().unwrap();
        assert!(loader.try_load_dir(empty.path()).await.unwrap().is_none());
    }

    #[test]
    fn test_header_env_indirection() {
        std::env::set_var("INTERVIEW_TEST_HEADER_TOKEN", "secret");
        let mut headers = HashMap::new();
        headers.insert(
            "Authorization".to_string(),
            "env:INTERVIEW_TEST_HEADER_TOKEN".to_string(),
        );
        headers.insert("X-Client".to_string(), "cli".to_string());

        let config = resolve_config(RawConfig {
            headers,
            ..RawConfig::default()
        })
        .unwrap();
        assert_eq!(config.headers["Authorization"], "secret");
        assert_eq!(config.headers["X-Client"], "cli");

        let mut missing = HashMap::new();
        missing.insert(
            "Authorization".to_string(),
            "env:INTERVIEW_TEST_HEADER_UNSET".to_string(),
        );
        assert!(resolve_config(RawConfig {
            headers: missing,
            ..RawConfig::default()
        })
        .is_err());
    }

    #[test]
    fn test_invalid_base_url_fails_validation() {
        let result = resolve_config(RawConfig {
            base_url: Some("ftp://example.com".to_string()),
            ..RawConfig::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_speech_command_is_ignored() {
        let config = resolve_config(RawConfig {
            speech_command: Some("  ".to_string()),
            ..RawConfig::default()
        })
        .unwrap();
        assert!(config.speech_command.is_none());
    }
}
