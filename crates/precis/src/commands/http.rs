//! Http command: serve the summarization JSON API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use tracing::{info, instrument};

use precis_core::Summarizer;
use precis_core::config::{Config, DEFAULT_HTTP_ADDR};

use crate::http::{AppState, router};

/// Arguments for the `http` subcommand.
#[derive(Args, Debug, Default)]
pub struct HttpArgs {
    /// Address to bind (default from config, else 127.0.0.1:5000).
    #[arg(long, value_name = "ADDR")]
    pub addr: Option<SocketAddr>,
}

/// Bind the API and serve until Ctrl-C.
#[instrument(name = "cmd_http", skip_all)]
pub async fn cmd_http(
    args: HttpArgs,
    max_input_bytes: Option<usize>,
    config: &Config,
) -> anyhow::Result<()> {
    let addr = resolve_addr(args.addr, config.http_addr.as_deref())?;
    let summarizer = Summarizer::from_config(config).context("failed to set up summarizer")?;
    let app = router(AppState::new(Arc::new(summarizer), max_input_bytes));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "HTTP API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    info!("HTTP API stopped");
    Ok(())
}

fn resolve_addr(flag: Option<SocketAddr>, configured: Option<&str>) -> anyhow::Result<SocketAddr> {
    if let Some(addr) = flag {
        return Ok(addr);
    }
    let raw = configured.unwrap_or(DEFAULT_HTTP_ADDR);
    raw.parse()
        .with_context(|| format!("invalid http_addr in configuration: {raw}"))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
