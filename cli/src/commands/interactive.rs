//! Interactive interview: open a session, then converse over stdin

use crate::config::{loader::expand_path, CliConfigLoader};
use crate::output::CliOutputHandler;
use anyhow::{Context, Result};
use colored::Colorize;
use interview_core::error::{Error, SessionError};
use interview_core::output::SessionOutput;
use interview_core::{InterviewSession, RespondOutcome};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A response to the current question
    Respond(String),
    /// `/progress`: show the summary so far
    Progress,
    /// `/end`: terminate the interview
    End,
    /// `/help`
    Help,
    /// Unrecognized slash command
    Unknown(String),
    /// Nothing but whitespace
    Blank,
}

/// Classify a line typed at the prompt
pub fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Blank;
    }

    match trimmed {
        "/progress" => Input::Progress,
        "/end" => Input::End,
        "/help" => Input::Help,
        command if command.starts_with('/') && !command.contains(char::is_whitespace) => {
            Input::Unknown(command.to_string())
        }
        response => Input::Respond(response.to_string()),
    }
}

/// Start or upload a resume, then run the conversation loop
pub async fn interview_command(
    config_loader: CliConfigLoader,
    resume: Option<PathBuf>,
    transcript_file: Option<PathBuf>,
) -> Result<()> {
    let output = Arc::new(CliOutputHandler::default());
    let mut session = super::session_builder(config_loader, transcript_file, output.clone())
        .await?
        .build()?;

    let opened = match resume {
        Some(path) => {
            let path = expand_path(&path);
            output.start_waiting("Uploading resume...");
            let result = session.upload_resume_from_path(&path).await;
            output.stop_waiting();
            result.with_context(|| format!("Failed to upload resume {}", path.display()))
        }
        None => {
            output.start_waiting("Starting interview...");
            let result = session.start().await;
            output.stop_waiting();
            result.context("Failed to start the interview")
        }
    };
    opened?;

    let hint = "Type your answer and press Enter. /help lists commands.";
    println!("{}", hint.dimmed());

    let stdin = BufReader::new(tokio::io::stdin());
    run_conversation(&mut session, &output, stdin).await?;

    if let Some(path) = session.recorder().and_then(|r| r.file_path()) {
        info!("Transcript saved to {}", path.display());
    }

    Ok(())
}

/// Drive an active session from line-oriented input until it ends or input runs out
pub async fn run_conversation<R>(
    session: &mut InterviewSession,
    output: &CliOutputHandler,
    reader: R,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    while session.state().is_active() {
        let line = match session.listen().await {
            Some(spoken) => spoken,
            None => {
                prompt();
                match lines.next_line().await.context("Failed to read input")? {
                    Some(line) => line,
                    None => {
                        if let Some(session_id) = session.session_id() {
                            info!("Input closed; session {} left open", session_id);
                        }
                        break;
                    }
                }
            }
        };

        match parse_input(&line) {
            Input::Blank => {}
            Input::Help => print_help(),
            Input::Unknown(command) => {
                report(output, &format!("Unknown command {}; try /help", command)).await;
            }
            Input::Progress => {
                output.start_waiting("Fetching progress...");
                let result = session.fetch_summary().await;
                output.stop_waiting();
                if let Err(e) = result {
                    report(output, &e.to_string()).await;
                }
            }
            Input::End => {
                output.start_waiting("Ending interview...");
                let result = session.end().await;
                output.stop_waiting();
                if let Err(e) = result {
                    report(output, &e.to_string()).await;
                }
            }
            Input::Respond(text) => {
                output.start_waiting("Waiting for the interviewer...");
                let result = session.respond(&text).await;
                output.stop_waiting();
                match result {
                    Ok(RespondOutcome::Closing { summary: None, .. }) => {
                        let hint = format!(
                            "Summary not available yet; retry with `interview summary {}`",
                            session.session_id().unwrap_or_default()
                        );
                        if let Err(e) = output.warning(&hint).await {
                            warn!("Failed to print hint: {}", e);
                        }
                    }
                    Ok(_) => {}
                    Err(Error::Session(SessionError::EmptyResponse)) => {}
                    Err(e) => report(output, &e.to_string()).await,
                }
            }
        }
    }

    Ok(())
}

fn prompt() {
    print!("{} ", "You:".bold().green());
    if let Err(e) = std::io::stdout().flush() {
        warn!("Failed to flush prompt: {}", e);
    }
}

fn print_help() {
    println!("{}", "Commands".bold());
    println!("  /progress  show the evaluation so far");
    println!("  /end       end the interview");
    println!("  /help      show this help");
    println!("Anything else is sent as your answer. End of input leaves the session open.");
}

async fn report(output: &CliOutputHandler, message: &str) {
    if let Err(e) = output.error(message).await {
        warn!("Failed to print error: {}", e);
    }
}
