//! Serve command: run the MCP server on stdio.

use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::{info, instrument};

use precis_core::Summarizer;
use precis_core::config::Config;

use crate::server::ProjectServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Start the MCP server and block until the client disconnects.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    max_input_bytes: Option<usize>,
    config: &Config,
) -> anyhow::Result<()> {
    let summarizer = Summarizer::from_config(config).context("failed to set up summarizer")?;
    let server = ProjectServer::new(Arc::new(summarizer), max_input_bytes);

    info!("starting MCP server on stdio");
    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;
    let reason = service.waiting().await.context("MCP server task failed")?;
    info!(?reason, "MCP server stopped");
    Ok(())
}
