//! Client-observed session state machine

use crate::interview::Stage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a session reached ENDED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The service reported the terminal stage
    Closing,
    /// The client called `end`
    Terminated,
}

/// `UNSTARTED -> ACTIVE -> ENDED`
///
/// Every state after UNSTARTED carries the session id, which never changes
/// once obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unstarted,
    Active {
        session_id: String,
        stage: Option<Stage>,
    },
    Ended {
        session_id: String,
        stage: Option<Stage>,
        reason: EndReason,
    },
}

impl SessionState {
    /// Session id, once one has been obtained
    pub fn session_id(&self) -> Option<&str> {
        match self {
            SessionState::Unstarted => None,
            SessionState::Active { session_id, .. } | SessionState::Ended { session_id, .. } => {
                Some(session_id)
            }
        }
    }

    /// Last stage reported by the service
    pub fn stage(&self) -> Option<&Stage> {
        match self {
            SessionState::Unstarted => None,
            SessionState::Active { stage, .. } | SessionState::Ended { stage, .. } => {
                stage.as_ref()
            }
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active { .. })
    }

    /// How the session ended, if it did
    pub fn end_reason(&self) -> Option<EndReason> {
        match self {
            SessionState::Ended { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Unstarted => write!(f, "unstarted"),
            SessionState::Active { .. } => write!(f, "active"),
            SessionState::Ended { .. } => write!(f, "ended"),
        }
    }
}
