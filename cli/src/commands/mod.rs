//! CLI command implementations

pub mod end;
pub mod interactive;
pub mod summary;

pub use end::end_command;
pub use interactive::interview_command;
pub use summary::summary_command;

use crate::config::{loader::expand_path, CliConfigLoader};
use crate::output::CliOutputHandler;
use crate::speech::CommandSpeech;
use anyhow::{Context, Result};
use interview_core::recording::TranscriptRecorder;
use interview_core::SessionBuilder;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Resolve configuration and wire output, speech and recording into a builder
pub(crate) async fn session_builder(
    config_loader: CliConfigLoader,
    transcript_file: Option<PathBuf>,
    output: Arc<CliOutputHandler>,
) -> Result<SessionBuilder> {
    let config = config_loader
        .load()
        .await
        .context("Failed to load configuration")?;
    info!("Using interview service at {}", config.base_url);

    let speech_command = config.speech_command.clone();
    let mut builder = SessionBuilder::new(config).with_output(output);

    if let Some(command) = speech_command {
        info!("Speaking interviewer turns via: {}", command);
        builder = builder.with_speech(Box::new(CommandSpeech::new(command)));
    }

    if let Some(path) = transcript_file {
        let path = expand_path(&path);
        info!("Recording transcript to {}", path.display());
        builder = builder.with_recorder(TranscriptRecorder::with_file(path));
    }

    Ok(builder)
}
