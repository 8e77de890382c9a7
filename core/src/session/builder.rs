//! Builder for wiring a session to the HTTP interview service

use crate::api::HttpInterviewApi;
use crate::config::ResolvedClientConfig;
use crate::error::Result;
use crate::output::SessionOutput;
use crate::recording::TranscriptRecorder;
use crate::session::InterviewSession;
use crate::speech::SpeechCapability;
use std::sync::Arc;

/// Builder for creating sessions with resolved client configuration
pub struct SessionBuilder {
    config: ResolvedClientConfig,
    output: Option<Arc<dyn SessionOutput>>,
    speech: Option<Box<dyn SpeechCapability>>,
    recorder: Option<TranscriptRecorder>,
}

impl SessionBuilder {
    /// Create a new session builder with client configuration
    pub fn new(config: ResolvedClientConfig) -> Self {
        Self {
            config,
            output: None,
            speech: None,
            recorder: None,
        }
    }

    /// Set output handler
    pub fn with_output(mut self, output: Arc<dyn SessionOutput>) -> Self {
        self.output = Some(output);
        self
    }

    /// Set speech capability
    pub fn with_speech(mut self, speech: Box<dyn SpeechCapability>) -> Self {
        self.speech = Some(speech);
        self
    }

    /// Record the session to a transcript recorder
    pub fn with_recorder(mut self, recorder: TranscriptRecorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Build an unstarted session
    pub fn build(self) -> Result<InterviewSession> {
        let api = Arc::new(HttpInterviewApi::new(&self.config)?);
        Ok(self.finish(InterviewSession::new(api)))
    }

    /// Build a session bound to an id issued earlier by the service
    pub fn attach<S: Into<String>>(self, session_id: S) -> Result<InterviewSession> {
        let api = Arc::new(HttpInterviewApi::new(&self.config)?);
        let session = InterviewSession::attach(api, session_id)?;
        Ok(self.finish(session))
    }

    fn finish(self, mut session: InterviewSession) -> InterviewSession {
        if let Some(output) = self.output {
            session = session.with_output(output);
        }
        if let Some(speech) = self.speech {
            session = session.with_speech(speech);
        }
        if let Some(recorder) = self.recorder {
            session = session.with_recorder(recorder);
        }
        session
    }
}
