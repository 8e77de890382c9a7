//! End command: terminate an existing session

use crate::config::CliConfigLoader;
use crate::output::CliOutputHandler;
use anyhow::{Context, Result};
use interview_core::output::{MessageLevel, SessionOutput};
use std::sync::Arc;

/// End `session_id`, printing the final summary when the service returns one
pub async fn end_command(config_loader: CliConfigLoader, session_id: String) -> Result<()> {
    let output = Arc::new(CliOutputHandler::default());
    let mut session = super::session_builder(config_loader, None, output.clone())
        .await?
        .attach(session_id.clone())?;

    output.start_waiting("Ending interview...");
    let result = session.end().await;
    output.stop_waiting();

    let summary = result.with_context(|| format!("Failed to end session {}", session_id))?;
    if summary.is_none() {
        output
            .emit_message(MessageLevel::Normal, "No summary was returned")
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;
    }
    Ok(())
}
