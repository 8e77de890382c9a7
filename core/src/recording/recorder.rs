//! Session recorder implementation

use crate::error::{RecordingError, Result};
use crate::recording::{EntryType, RecordEntry};
use crate::session::EndReason;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

/// Records interview sessions for later review
pub struct TranscriptRecorder {
    entries: RwLock<Vec<RecordEntry>>,
    file_path: Option<PathBuf>,
    auto_save: bool,
}

/// Complete recording data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecording {
    /// Metadata about the recording
    pub metadata: RecordingMetadata,

    /// All recording entries
    pub entries: Vec<RecordEntry>,
}

/// Metadata for a recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingMetadata {
    /// Unique identifier for this recording
    pub id: String,

    /// Session the recording belongs to
    pub session_id: Option<String>,

    /// When the session was started
    pub started_at: DateTime<Utc>,

    /// When the last entry was recorded
    pub completed_at: Option<DateTime<Utc>>,

    /// Version of the recording format
    pub version: String,

    /// How the session ended, if it did
    pub end_reason: Option<EndReason>,

    /// Overall score of the most recent summary
    pub overall_score: Option<f64>,

    /// Number of transcript messages
    pub message_count: usize,

    /// Total duration in milliseconds
    pub duration_ms: Option<u64>,
}

impl TranscriptRecorder {
    /// Create a new in-memory recorder
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            file_path: None,
            auto_save: false,
        }
    }

    /// Create a recorder that saves to a file after every entry
    pub fn with_file<P: AsRef<Path>>(path: P) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            file_path: Some(path.as_ref().to_path_buf()),
            auto_save: true,
        }
    }

    /// Record an entry
    pub async fn record(&self, entry: RecordEntry) -> Result<()> {
        {
            let mut entries = self.entries.write().await;
            entries.push(entry);
        }

        if self.auto_save {
            self.save().await?;
        }

        Ok(())
    }

    /// Get all recorded entries
    pub async fn get_entries(&self) -> Vec<RecordEntry> {
        self.entries.read().await.clone()
    }

    /// Get the number of recorded entries
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Save the recording to file
    pub async fn save(&self) -> Result<()> {
        if let Some(path) = &self.file_path {
            let recording = self.build_recording().await;
            let json = serde_json::to_string_pretty(&recording).map_err(|e| {
                RecordingError::RecordingFailed {
                    message: format!("Failed to serialize recording: {}", e),
                }
            })?;

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).await?;
            }

            fs::write(path, json).await?;
        }

        Ok(())
    }

    /// Load a recording from file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<SessionRecording> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(RecordingError::LoadFailed {
                path: path.to_string_lossy().to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(path).await?;
        let recording: SessionRecording =
            serde_json::from_str(&content).map_err(|_| RecordingError::InvalidFormat)?;

        Ok(recording)
    }

    /// Build a complete recording from recorded entries
    async fn build_recording(&self) -> SessionRecording {
        let entries = self.entries.read().await.clone();

        let started_at = entries
            .first()
            .map(|e| e.timestamp)
            .unwrap_or_else(Utc::now);
        let completed_at = entries.last().map(|e| e.timestamp);
        let duration_ms =
            completed_at.map(|end| (end - started_at).num_milliseconds().max(0) as u64);

        let mut session_id = None;
        let mut end_reason = None;
        let mut overall_score = None;
        let mut message_count = 0;

        for entry in &entries {
            match &entry.entry_type {
                EntryType::SessionStarted { session_id: id, .. } => {
                    session_id = Some(id.clone());
                }
                EntryType::Message { .. } => message_count += 1,
                EntryType::Summary { summary } => overall_score = Some(summary.overall_score),
                EntryType::SessionEnded { reason } => end_reason = Some(*reason),
                EntryType::Evaluation { .. } | EntryType::Error { .. } => {}
            }
        }

        let metadata = RecordingMetadata {
            id: uuid::Uuid::new_v4().to_string(),
            session_id,
            started_at,
            completed_at,
            version: "1.0".to_string(),
            end_reason,
            overall_score,
            message_count,
            duration_ms,
        };

        SessionRecording { metadata, entries }
    }

    /// Get the file path if set
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}

impl Default for TranscriptRecorder {
    fn default() -> Self {
        Self::new()
    }
}
