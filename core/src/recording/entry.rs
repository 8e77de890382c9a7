//! Recording entry structures

use crate::interview::{Evaluation, Message, Stage, Summary};
use crate::session::EndReason;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single entry in a session recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEntry {
    /// Unique identifier for this entry
    pub id: String,

    /// Timestamp when this entry was created
    pub timestamp: DateTime<Utc>,

    /// Type of entry
    pub entry_type: EntryType,
}

/// Type of recording entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryType {
    /// Session established
    SessionStarted {
        session_id: String,
        stage: Option<Stage>,
    },

    /// Message appended to the transcript
    Message { message: Message },

    /// Service scored a candidate response
    Evaluation { evaluation: Evaluation },

    /// Summary fetched
    Summary { summary: Summary },

    /// Session reached ENDED
    SessionEnded { reason: EndReason },

    /// A protocol step failed
    Error { error: String, operation: String },
}

impl RecordEntry {
    fn new(entry_type: EntryType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            entry_type,
        }
    }

    /// Create a session start entry
    pub fn session_started(session_id: &str, stage: Option<&Stage>) -> Self {
        Self::new(EntryType::SessionStarted {
            session_id: session_id.to_string(),
            stage: stage.cloned(),
        })
    }

    /// Create a transcript message entry
    pub fn message(message: Message) -> Self {
        Self::new(EntryType::Message { message })
    }

    /// Create an evaluation entry
    pub fn evaluation(evaluation: Evaluation) -> Self {
        Self::new(EntryType::Evaluation { evaluation })
    }

    /// Create a summary entry
    pub fn summary(summary: Summary) -> Self {
        Self::new(EntryType::Summary { summary })
    }

    /// Create a session end entry
    pub fn session_ended(reason: EndReason) -> Self {
        Self::new(EntryType::SessionEnded { reason })
    }

    /// Create an error entry
    pub fn error<S: Into<String>>(operation: &str, error: S) -> Self {
        Self::new(EntryType::Error {
            error: error.into(),
            operation: operation.to_string(),
        })
    }
}
