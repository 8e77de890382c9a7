//! Summary command: render the evaluation of an existing session

use crate::config::CliConfigLoader;
use crate::output::CliOutputHandler;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

/// Fetch and print the summary of `session_id`
pub async fn summary_command(config_loader: CliConfigLoader, session_id: String) -> Result<()> {
    let output = Arc::new(CliOutputHandler::default());
    let session = super::session_builder(config_loader, None, output.clone())
        .await?
        .attach(session_id.clone())?;

    debug!("Fetching summary for {}", session_id);
    output.start_waiting("Fetching summary...");
    let result = session.fetch_summary().await;
    output.stop_waiting();

    // Rendered by the output handler on SummaryReady
    result.with_context(|| format!("Failed to fetch summary for session {}", session_id))?;
    Ok(())
}
