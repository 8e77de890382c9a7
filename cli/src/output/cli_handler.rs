//! CLI output handler implementation

use super::formatters::{EvaluationFormatter, SummaryFormatter};
use async_trait::async_trait;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use interview_core::output::{MessageLevel, SessionEvent, SessionOutput};
use interview_core::session::EndReason;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// CLI output configuration
#[derive(Debug, Clone)]
pub struct CliOutputConfig {
    /// Show the evaluation card after each scored response
    pub show_evaluations: bool,
    /// Show a spinner while a request is in flight
    pub show_spinner: bool,
}

impl Default for CliOutputConfig {
    fn default() -> Self {
        Self {
            show_evaluations: true,
            show_spinner: true,
        }
    }
}

/// CLI output handler that formats session events for terminal display
pub struct CliOutputHandler {
    config: CliOutputConfig,
    evaluation_formatter: EvaluationFormatter,
    summary_formatter: SummaryFormatter,
    /// Spinner shown while waiting on the service
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliOutputHandler {
    /// Create a new CLI output handler
    pub fn new(config: CliOutputConfig) -> Self {
        Self {
            config,
            evaluation_formatter: EvaluationFormatter::new(),
            summary_formatter: SummaryFormatter::new(),
            spinner: Mutex::new(None),
        }
    }

    /// Show a spinner until `stop_waiting` is called
    pub fn start_waiting(&self, message: &str) {
        if !self.config.show_spinner {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.replace(spinner) {
                previous.finish_and_clear();
            }
        }
    }

    /// Remove the spinner, if any
    pub fn stop_waiting(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(spinner) = slot.take() {
                spinner.finish_and_clear();
            }
        }
    }

    /// Print a line without tearing the spinner
    fn print(&self, text: &str) {
        match self.spinner.lock() {
            Ok(slot) => match slot.as_ref() {
                Some(spinner) => spinner.suspend(|| println!("{}", text)),
                None => println!("{}", text),
            },
            Err(_) => println!("{}", text),
        }
    }
}

impl Default for CliOutputHandler {
    fn default() -> Self {
        Self::new(CliOutputConfig::default())
    }
}

#[async_trait]
impl SessionOutput for CliOutputHandler {
    async fn emit_event(
        &self,
        event: SessionEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match event {
            SessionEvent::SessionStarted { session_id, stage } => {
                debug!("Session {} started at {:?}", session_id, stage);
                let line = format!("Session {}", session_id);
                self.print(&line.dimmed().to_string());
            }

            SessionEvent::InterviewerTurn { content, .. } => {
                self.print(&format!("{} {}", "Interviewer:".bold().blue(), content));
            }

            SessionEvent::CandidateTurn { content } => {
                // Already on screen as typed input
                debug!("Candidate: {}", content);
            }

            SessionEvent::ResponseEvaluated { evaluation } => {
                if self.config.show_evaluations {
                    self.print(&self.evaluation_formatter.format(&evaluation));
                }
            }

            SessionEvent::StageChanged { from, to } => {
                debug!("Stage {:?} -> {}", from, to);
                let line = format!("── {} ──", to.display_name());
                self.print(&line.magenta().to_string());
            }

            SessionEvent::SummaryReady { summary } => {
                self.print("");
                self.print(&self.summary_formatter.format(&summary));
            }

            SessionEvent::SessionEnded { session_id, reason } => {
                let line = match reason {
                    EndReason::Closing => format!("Interview {} complete", session_id),
                    EndReason::Terminated => format!("Interview {} ended", session_id),
                };
                self.print(&line.green().to_string());
            }

            SessionEvent::Message { level, content } => match level {
                MessageLevel::Debug => {
                    debug!("{}", content);
                }
                MessageLevel::Info => {
                    info!("{}", content);
                }
                MessageLevel::Normal => {
                    self.print(&content);
                }
                MessageLevel::Warning => {
                    warn!("{}", content);
                    self.print(&format!("{} {}", "Warning:".yellow(), content));
                }
                MessageLevel::Error => {
                    error!("{}", content);
                    self.print(&format!("{} {}", "Error:".red(), content));
                }
            },
        }

        Ok(())
    }

    async fn flush(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        use std::io::Write;
        std::io::stdout().flush().map_err(|e| e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handler_accepts_every_event_without_spinner() {
        let handler = CliOutputHandler::new(CliOutputConfig {
            show_evaluations: false,
            show_spinner: false,
        });
        handler.start_waiting("Thinking");
        assert!(handler.spinner.lock().unwrap().is_none());

        handler
            .emit_event(SessionEvent::SessionEnded {
                session_id: "abc123".to_string(),
                reason: EndReason::Terminated,
            })
            .await
            .unwrap();
        handler
            .emit_message(MessageLevel::Normal, "hello")
            .await
            .unwrap();
        handler.stop_waiting();
        assert!(handler.flush().await.is_ok());
    }

    #[tokio::test]
    async fn test_spinner_is_replaced_and_cleared() {
        let handler = CliOutputHandler::default();
        handler.start_waiting("first");
        handler.start_waiting("second");
        assert!(handler.spinner.lock().unwrap().is_some());

        handler.info("while waiting").await.unwrap();
        handler.stop_waiting();
        assert!(handler.spinner.lock().unwrap().is_none());
    }
}
