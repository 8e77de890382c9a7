//! Output abstraction for interview sessions
//!
//! The session controller reports every lifecycle step as a [`SessionEvent`];
//! front ends implement [`SessionOutput`] to render them.

use crate::interview::{Evaluation, Stage, Summary};
use crate::session::EndReason;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Null output implementation that discards all events
pub struct NullOutput;

#[async_trait]
impl SessionOutput for NullOutput {
    async fn emit_event(
        &self,
        _event: SessionEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}

/// Events emitted while an interview runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A session was established
    SessionStarted {
        session_id: String,
        stage: Option<Stage>,
    },
    /// The interviewer said something
    InterviewerTurn {
        content: String,
        stage: Option<Stage>,
    },
    /// The candidate submitted a response
    CandidateTurn { content: String },
    /// The service scored the latest candidate response
    ResponseEvaluated { evaluation: Evaluation },
    /// The interview moved to another stage
    StageChanged { from: Option<Stage>, to: Stage },
    /// A summary was fetched or returned by `end`
    SummaryReady { summary: Summary },
    /// The session reached ENDED
    SessionEnded {
        session_id: String,
        reason: EndReason,
    },
    /// General message or log
    Message {
        level: MessageLevel,
        content: String,
    },
}

/// Message severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageLevel {
    Debug,
    Info,
    Normal,
    Warning,
    Error,
}

/// Abstract output interface for interview sessions
#[async_trait]
pub trait SessionOutput: Send + Sync {
    /// Emit a session event
    async fn emit_event(
        &self,
        event: SessionEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Emit a message with specified level
    async fn emit_message(
        &self,
        level: MessageLevel,
        content: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.emit_event(SessionEvent::Message {
            level,
            content: content.to_string(),
        })
        .await
    }

    /// Emit info message
    async fn info(&self, content: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.emit_message(MessageLevel::Info, content).await
    }

    /// Emit warning message
    async fn warning(&self, content: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.emit_message(MessageLevel::Warning, content).await
    }

    /// Emit error message
    async fn error(&self, content: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.emit_message(MessageLevel::Error, content).await
    }

    /// Flush any buffered output (for implementations that buffer)
    async fn flush(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}

/// Output that collects events in memory
///
/// Useful for tests and for front ends that render after the fact.
#[derive(Default)]
pub struct BufferedOutput {
    events: std::sync::Mutex<Vec<SessionEvent>>,
}

impl BufferedOutput {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain every event collected so far
    pub fn take(&self) -> Vec<SessionEvent> {
        match self.events.lock() {
            Ok(mut events) => events.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        }
    }
}

#[async_trait]
impl SessionOutput for BufferedOutput {
    async fn emit_event(
        &self,
        event: SessionEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.events
            .lock()
            .map_err(|_| "event buffer poisoned")?
            .push(event);
        Ok(())
    }
}
