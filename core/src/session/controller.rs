//! Interview session controller

use crate::api::{is_valid_session_id, InterviewApi, ResumeUpload, SessionOpened};
use crate::error::{ApiError, ConfigError, Error, Result, SessionError};
use crate::interview::{Evaluation, Message, Stage, Summary, Transcript};
use crate::output::{NullOutput, SessionEvent, SessionOutput};
use crate::recording::{RecordEntry, TranscriptRecorder};
use crate::session::{EndReason, SessionState};
use crate::speech::{SpeechCapability, Utterance};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// One interviewer turn returned by `respond`
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    /// Next interviewer question
    pub question: String,
    /// Stage after the response
    pub stage: Stage,
    /// Scoring of the submitted response
    pub evaluation: Option<Evaluation>,
}

/// Result of a successful `respond`
#[derive(Debug, Clone, PartialEq)]
pub enum RespondOutcome {
    /// The interview goes on
    Continue(Turn),
    /// The service reported the terminal stage
    ///
    /// `summary` is `None` only when fetching it failed; the session has
    /// ended either way and `fetch_summary` can be retried.
    Closing {
        turn: Turn,
        summary: Option<Summary>,
    },
}

impl RespondOutcome {
    pub fn is_closing(&self) -> bool {
        matches!(self, RespondOutcome::Closing { .. })
    }
}

/// Owns the state of one interview: session id, stage and transcript
///
/// Mutating operations take `&mut self`, so a single controller can never
/// have two requests in flight against its session.
pub struct InterviewSession {
    api: Arc<dyn InterviewApi>,
    output: Arc<dyn SessionOutput>,
    speech: Option<Box<dyn SpeechCapability>>,
    recorder: Option<TranscriptRecorder>,
    state: SessionState,
    transcript: Transcript,
}

impl InterviewSession {
    /// Create an unstarted session against the given service
    pub fn new(api: Arc<dyn InterviewApi>) -> Self {
        Self {
            api,
            output: Arc::new(NullOutput),
            speech: None,
            recorder: None,
            state: SessionState::Unstarted,
            transcript: Transcript::new(),
        }
    }

    /// Create a controller for a session that already exists on the service
    ///
    /// The transcript starts empty and the stage is unknown until the next
    /// turn reports one.
    pub fn attach<S: Into<String>>(api: Arc<dyn InterviewApi>, session_id: S) -> Result<Self> {
        let session_id = session_id.into();
        if session_id.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "session_id".to_string(),
            }
            .into());
        }
        if !is_valid_session_id(&session_id) {
            return Err(ConfigError::InvalidValue {
                field: "session_id".to_string(),
                value: session_id,
            }
            .into());
        }

        let mut session = Self::new(api);
        session.state = SessionState::Active {
            session_id,
            stage: None,
        };
        Ok(session)
    }

    /// Set the output handler
    pub fn with_output(mut self, output: Arc<dyn SessionOutput>) -> Self {
        self.output = output;
        self
    }

    /// Set the speech capability
    pub fn with_speech(mut self, speech: Box<dyn SpeechCapability>) -> Self {
        self.speech = Some(speech);
        self
    }

    /// Set the transcript recorder
    pub fn with_recorder(mut self, recorder: TranscriptRecorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Current state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Session id, once established
    pub fn session_id(&self) -> Option<&str> {
        self.state.session_id()
    }

    /// Last stage reported by the service
    pub fn stage(&self) -> Option<&Stage> {
        self.state.stage()
    }

    /// Conversation so far
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The recorder, if one is configured
    pub fn recorder(&self) -> Option<&TranscriptRecorder> {
        self.recorder.as_ref()
    }

    /// Open a session without a resume
    pub async fn start(&mut self) -> Result<()> {
        self.ensure_unstarted()?;
        info!("Starting interview at {}", self.api.base_url());

        match self.api.start().await {
            Ok(opened) => self.open(opened).await,
            Err(e) => {
                error!("Error starting interview: {}", e);
                self.record_error("start", &e).await;
                Err(e)
            }
        }
    }

    /// Open a session by uploading a resume
    pub async fn upload_resume(&mut self, resume: ResumeUpload) -> Result<()> {
        self.ensure_unstarted()?;
        info!("Uploading resume {}", resume.file_name);

        match self.api.upload_resume(resume).await {
            Ok(opened) => self.open(opened).await,
            Err(e) => {
                error!("Error uploading resume: {}", e);
                self.record_error("upload-resume", &e).await;
                Err(e)
            }
        }
    }

    /// Read a resume from disk and upload it
    pub async fn upload_resume_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.ensure_unstarted()?;
        let resume = ResumeUpload::from_path(path).await?;
        self.upload_resume(resume).await
    }

    /// Submit a candidate response
    ///
    /// The candidate message is appended before the request goes out and
    /// stays in the transcript if the request fails.
    pub async fn respond(&mut self, text: &str) -> Result<RespondOutcome> {
        let (session_id, previous_stage) = match &self.state {
            SessionState::Unstarted => return Err(SessionError::NotStarted.into()),
            SessionState::Ended { session_id, .. } => {
                return Err(SessionError::Ended {
                    session_id: session_id.clone(),
                }
                .into())
            }
            SessionState::Active { session_id, stage } => (session_id.clone(), stage.clone()),
        };

        let response = text.trim();
        if response.is_empty() {
            return Err(SessionError::EmptyResponse.into());
        }

        let candidate = Message::candidate(response);
        let index = self.transcript.push(candidate.clone());
        self.emit(SessionEvent::CandidateTurn {
            content: response.to_string(),
        })
        .await;
        self.record(RecordEntry::message(candidate)).await;

        let reply = match self.api.respond(&session_id, response).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Error submitting response: {}", e);
                self.record_error("respond", &e).await;
                return Err(e);
            }
        };
        debug!("Session {} now at stage {}", session_id, reply.stage);

        if let Some(evaluation) = &reply.evaluation {
            if self.transcript.attach_evaluation(index, evaluation.clone()) {
                self.emit(SessionEvent::ResponseEvaluated {
                    evaluation: evaluation.clone(),
                })
                .await;
                self.record(RecordEntry::evaluation(evaluation.clone()))
                    .await;
            }
        }

        if previous_stage.as_ref() != Some(&reply.stage) {
            self.emit(SessionEvent::StageChanged {
                from: previous_stage,
                to: reply.stage.clone(),
            })
            .await;
        }

        self.state = SessionState::Active {
            session_id: session_id.clone(),
            stage: Some(reply.stage.clone()),
        };
        self.push_interviewer(&reply.question, Some(&reply.stage), reply.audio.as_deref())
            .await;

        let turn = Turn {
            question: reply.question,
            stage: reply.stage,
            evaluation: reply.evaluation,
        };

        if !turn.stage.is_terminal() {
            return Ok(RespondOutcome::Continue(turn));
        }

        info!("Interview {} reached the closing stage", session_id);
        self.finish(EndReason::Closing).await;

        let summary = match self.fetch_summary().await {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!("Failed to fetch summary after closing: {}", e);
                if let Err(err) = self
                    .output
                    .warning("The interview has closed but its summary could not be loaded")
                    .await
                {
                    warn!("Failed to emit warning: {}", err);
                }
                None
            }
        };

        Ok(RespondOutcome::Closing { turn, summary })
    }

    /// Fetch the current summary without changing any state
    pub async fn fetch_summary(&self) -> Result<Summary> {
        let session_id = match &self.state {
            SessionState::Unstarted => return Err(SessionError::NotStarted.into()),
            SessionState::Ended {
                session_id,
                reason: EndReason::Terminated,
                ..
            } => {
                return Err(SessionError::SummaryUnavailable {
                    session_id: session_id.clone(),
                }
                .into())
            }
            SessionState::Active { session_id, .. } | SessionState::Ended { session_id, .. } => {
                session_id
            }
        };

        match self.api.summary(session_id).await {
            Ok(summary) => {
                self.emit(SessionEvent::SummaryReady {
                    summary: summary.clone(),
                })
                .await;
                self.record(RecordEntry::summary(summary.clone())).await;
                Ok(summary)
            }
            Err(e) => {
                error!("Error fetching interview summary: {}", e);
                self.record_error("summary", &e).await;
                Err(e)
            }
        }
    }

    /// Terminate the session, returning the service's final summary if any
    pub async fn end(&mut self) -> Result<Option<Summary>> {
        let session_id = match &self.state {
            SessionState::Unstarted => return Err(SessionError::NotStarted.into()),
            SessionState::Ended {
                session_id,
                reason: EndReason::Terminated,
                ..
            } => {
                return Err(SessionError::Ended {
                    session_id: session_id.clone(),
                }
                .into())
            }
            SessionState::Active { session_id, .. } | SessionState::Ended { session_id, .. } => {
                session_id.clone()
            }
        };

        let ended = match self.api.end(&session_id).await {
            Ok(ended) => ended,
            Err(e) => {
                error!("Error ending interview: {}", e);
                self.record_error("end", &e).await;
                return Err(e);
            }
        };

        info!("Interview {} ended", session_id);
        self.finish(EndReason::Terminated).await;

        if let Some(summary) = &ended.summary {
            self.emit(SessionEvent::SummaryReady {
                summary: summary.clone(),
            })
            .await;
            self.record(RecordEntry::summary(summary.clone())).await;
        }

        Ok(ended.summary)
    }

    /// Capture a spoken response, if the speech capability can
    pub async fn listen(&self) -> Option<String> {
        let speech = self.speech.as_ref()?;
        match speech.listen().await {
            Ok(transcript) => transcript,
            Err(e) => {
                warn!("Speech recognition via {} failed: {}", speech.name(), e);
                None
            }
        }
    }

    fn ensure_unstarted(&self) -> Result<()> {
        match self.state.session_id() {
            None => Ok(()),
            Some(session_id) => Err(SessionError::AlreadyStarted {
                session_id: session_id.to_string(),
            }
            .into()),
        }
    }

    async fn open(&mut self, opened: SessionOpened) -> Result<()> {
        let SessionOpened {
            session_id,
            message,
            stage,
            audio,
        } = opened;

        if !is_valid_session_id(&session_id) {
            error!("Unusable session id from service: {:?}", session_id);
            return Err(ApiError::InvalidResponse {
                message: format!("unusable session_id: {:?}", session_id),
            }
            .into());
        }

        info!("Interview session {} started", session_id);
        self.state = SessionState::Active {
            session_id: session_id.clone(),
            stage: stage.clone(),
        };
        self.emit(SessionEvent::SessionStarted {
            session_id: session_id.clone(),
            stage: stage.clone(),
        })
        .await;
        let entry = RecordEntry::session_started(&session_id, stage.as_ref());
        self.record(entry).await;

        self.push_interviewer(&message, stage.as_ref(), audio.as_deref())
            .await;
        Ok(())
    }

    async fn finish(&mut self, reason: EndReason) {
        let session_id = match self.state.session_id() {
            Some(session_id) => session_id.to_string(),
            None => return,
        };
        let stage = self.state.stage().cloned();

        self.state = SessionState::Ended {
            session_id: session_id.clone(),
            stage,
            reason,
        };
        self.emit(SessionEvent::SessionEnded { session_id, reason })
            .await;
        self.record(RecordEntry::session_ended(reason)).await;
    }

    async fn push_interviewer(
        &mut self,
        content: &str,
        stage: Option<&Stage>,
        audio: Option<&str>,
    ) {
        let message = Message::interviewer(content);
        self.transcript.push(message.clone());
        self.emit(SessionEvent::InterviewerTurn {
            content: content.to_string(),
            stage: stage.cloned(),
        })
        .await;
        self.record(RecordEntry::message(message)).await;

        if let Some(speech) = &self.speech {
            let utterance = Utterance::from_service(content, audio);
            if let Err(e) = speech.speak(&utterance).await {
                warn!("Speech synthesis via {} failed: {}", speech.name(), e);
            }
        }
    }

    async fn emit(&self, event: SessionEvent) {
        if let Err(e) = self.output.emit_event(event).await {
            warn!("Failed to emit session event: {}", e);
        }
    }

    async fn record(&self, entry: RecordEntry) {
        if let Some(recorder) = &self.recorder {
            if let Err(e) = recorder.record(entry).await {
                warn!("Failed to record session entry: {}", e);
            }
        }
    }

    async fn record_error(&self, operation: &str, error: &Error) {
        let entry = RecordEntry::error(operation, error.to_string());
        self.record(entry).await;
    }
}
