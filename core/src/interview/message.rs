//! Transcript message structures

use super::evaluation::Evaluation;
use serde::{Deserialize, Serialize};

/// Who said a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The interview service
    Interviewer,

    /// The person being interviewed
    Candidate,
}

/// One turn of the interview conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the speaker
    pub role: Role,

    /// Text of the turn
    pub content: String,

    /// Scoring of a candidate turn, once the service has produced it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,
}

impl Message {
    /// Create a new interviewer message
    pub fn interviewer<S: Into<String>>(content: S) -> Self {
        Self {
            role: Role::Interviewer,
            content: content.into(),
            evaluation: None,
        }
    }

    /// Create a new candidate message
    pub fn candidate<S: Into<String>>(content: S) -> Self {
        Self {
            role: Role::Candidate,
            content: content.into(),
            evaluation: None,
        }
    }
}
