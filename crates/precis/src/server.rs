//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes the summarizer over MCP on stdio so AI assistants can condense
//! long documents before reading them.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer: it wraps the same [`Summarizer`]
//! the CLI uses. Tool methods validate parameters, delegate to the core
//! library and serialize its report.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use precis_core::markdown;
use precis_core::{MatchMode, Summarizer, SummaryOptions};

use crate::commands::check_input_size;

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `summarize` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SummarizeParams {
    /// The text to summarize.
    pub text: String,
    /// Threshold multiplier applied to the mean sentence score (default 1.2).
    /// Higher values give shorter summaries.
    pub scale_factor: Option<f64>,
    /// Matching strategy: "token" (default) or "substring".
    pub match_mode: Option<MatchMode>,
    /// Whether to strip markdown formatting before summarizing.
    #[serde(default)]
    pub strip_markdown: bool,
}

/// MCP server exposing the summarizer to AI assistants.
///
/// Each `#[tool]` method in the `#[tool_router]` impl block is automatically
/// registered and callable via the MCP protocol.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    summarizer: Arc<Summarizer>,
    max_input_bytes: Option<usize>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new(
            Arc::new(Summarizer::default()),
            Some(precis_core::DEFAULT_MAX_INPUT_BYTES),
        )
    }
}

#[tool_router]
impl ProjectServer {
    /// Create a server sharing `summarizer` across requests.
    pub fn new(summarizer: Arc<Summarizer>, max_input_bytes: Option<usize>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            summarizer,
            max_input_bytes,
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Summarize text by selecting its highest-scoring sentences.
    #[tool(
        description = "Summarize text extractively. Returns the selected original sentences with their scores, the threshold used, and the outcome."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", text_len = params.text.len()))]
    fn summarize(
        &self,
        Parameters(params): Parameters<SummarizeParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "summarize",
            strip_md = params.strip_markdown,
            scale_factor = ?params.scale_factor,
            "executing MCP tool"
        );

        check_input_size(&params.text, self.max_input_bytes)
            .map_err(|msg| McpError::invalid_params(msg, None))?;

        let defaults = self.summarizer.options();
        let options = SummaryOptions::new(
            params.scale_factor.unwrap_or(defaults.scale_factor()),
            params.match_mode.unwrap_or(defaults.match_mode()),
        )
        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let text = if params.strip_markdown {
            markdown::strip_to_prose(&params.text)
        } else {
            params.text
        };
        let summary = self.summarizer.summarize_with(&text, options);

        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(
            tool = "summarize",
            outcome = summary.outcome.as_str(),
            selected = summary.sentences.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use the summarize tool to extract the key sentences of a text.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
