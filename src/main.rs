mod api;
mod clients;
mod config;
mod console;
mod directory;
mod domain;
mod messages;
mod render;

mod app_system;

#[cfg(test)]
mod mock_framework;

use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;
use tracing::{error, info, Instrument};

use crate::api::HttpUserApi;
use crate::app_system::{setup_tracing, DirectorySystem};
use crate::config::Config;
use crate::console::run_console;

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = Config::parse();

    // Setup tracing once for the entire application
    setup_tracing();

    info!(api_url = %config.api_url, "Starting user directory");

    let api = HttpUserApi::new(config.api_url.clone(), config.timeout()).map_err(|e| e.to_string())?;
    let system = DirectorySystem::start(Arc::new(api), config.channel_capacity);

    // A failed first fetch leaves the directory empty; `reload` can retry.
    let span = tracing::info_span!("initial_load");
    match system.client.load().instrument(span).await {
        Ok(count) => info!(user_count = count, "Directory loaded"),
        Err(e) => error!(error = %e, "Initial load failed"),
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    if let Err(e) = run_console(&system.client, stdin, &mut stdout).await {
        error!(error = %e, "Console failed");
    }

    system.shutdown().await?;

    info!("User directory closed");
    Ok(())
}
