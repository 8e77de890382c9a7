//! # interview CLI
//!
//! Terminal front end for a remote interview service.
//!
//! ## Usage
//!
//! - `interview` / `interview start` - Start an interview and answer questions
//! - `interview upload resume.pdf` - Start an interview from a resume
//! - `interview summary <SESSION_ID>` - Show the evaluation of a session
//! - `interview end <SESSION_ID>` - End a session

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod output;
mod speech;

use commands::{end_command, interview_command, summary_command};
use config::CliConfigLoader;

/// interview - Take an AI-driven interview from the terminal
#[derive(Parser)]
#[command(name = "interview")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Take an AI-driven interview from the terminal")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Interview service base URL override
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Route prefix for start/respond/summary/end
    #[arg(long, global = true)]
    interview_path: Option<String>,

    /// Route for resume uploads
    #[arg(long, global = true)]
    upload_path: Option<String>,

    /// Command that speaks interviewer messages read from stdin
    #[arg(long, global = true)]
    speech_command: Option<String>,

    /// Record the session to this JSON file
    #[arg(long, global = true)]
    transcript_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interview (default)
    Start,

    /// Upload a resume and start an interview based on it
    Upload {
        /// Resume file (PDF, DOCX or text)
        file: PathBuf,
    },

    /// Show the evaluation summary of a session
    Summary {
        /// Session id printed when the interview started
        session_id: String,
    },

    /// End a session
    End {
        /// Session id printed when the interview started
        session_id: String,
    },
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(base_url) = &cli.base_url {
        loader = loader.with_base_url_override(base_url.clone());
    }

    if let Some(path) = &cli.interview_path {
        loader = loader.with_interview_path_override(path.clone());
    }

    if let Some(path) = &cli.upload_path {
        loader = loader.with_upload_path_override(path.clone());
    }

    if let Some(command) = &cli.speech_command {
        loader = loader.with_speech_command_override(command.clone());
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    // Build configuration loader
    let config_loader = build_config_loader(&cli);

    match cli.command {
        None | Some(Commands::Start) => {
            interview_command(config_loader, None, cli.transcript_file).await
        }
        Some(Commands::Upload { file }) => {
            interview_command(config_loader, Some(file), cli.transcript_file).await
        }
        Some(Commands::Summary { session_id }) => summary_command(config_loader, session_id).await,
        Some(Commands::End { session_id }) => end_command(config_loader, session_id).await,
    }
}
