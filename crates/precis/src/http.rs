//! HTTP JSON API.
//!
//! One resource, `/api/summarize`:
//!
//! - `GET` returns a usage message as `{"data": "..."}`.
//! - `POST {"story": "...", "scale_factor": 1.2}` returns `{"summary": "..."}`.
//!
//! Client mistakes get a `4xx` with `{"error": "..."}`. Pipeline outcomes
//! with nothing to select (empty text, no content words) are a `200` with an
//! empty summary. Internal failures are logged, never echoed to the client.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::{Deserialize, Serialize};

use precis_core::{Summarizer, SummaryOptions};

/// Usage message returned by `GET /api/summarize`.
pub const USAGE: &str = "Welcome to the precis summarizer API. To summarize, make a POST \
request to /api/summarize with a JSON body of the form \
{\"story\": \"some story content that needs summarizing\"}. \
An optional \"scale_factor\" raises or lowers the selection threshold.";

/// Shared, read-only state for all requests.
#[derive(Clone)]
pub struct AppState {
    summarizer: Arc<Summarizer>,
    max_body_bytes: Option<usize>,
}

impl AppState {
    /// Share `summarizer` across requests, rejecting bodies over `max_body_bytes`.
    pub const fn new(summarizer: Arc<Summarizer>, max_body_bytes: Option<usize>) -> Self {
        Self {
            summarizer,
            max_body_bytes,
        }
    }
}

/// `POST` body.
#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    /// The text to summarize.
    pub story: String,
    /// Per-request threshold multiplier.
    #[serde(default)]
    pub scale_factor: Option<f64>,
}

/// `POST` success response.
#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    /// Selected sentences joined by single spaces.
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct UsageResponse {
    data: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn too_large(limit: usize) -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("request body exceeds {limit} bytes"),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    let body_limit = match state.max_body_bytes {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };
    Router::new()
        .route("/api/summarize", get(usage).post(summarize))
        .layer(body_limit)
        .with_state(state)
}

async fn usage() -> Json<UsageResponse> {
    Json(UsageResponse {
        data: USAGE.to_string(),
    })
}

#[tracing::instrument(skip_all)]
async fn summarize(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let body = body.map_err(|rejection| {
        let status = rejection.status();
        tracing::info!(%status, "rejected request body");
        match (status, state.max_body_bytes) {
            (StatusCode::PAYLOAD_TOO_LARGE, Some(max)) => ApiError::too_large(max),
            _ => ApiError::new(status, "could not read request body"),
        }
    })?;
    if let Some(max) = state.max_body_bytes
        && body.len() > max
    {
        return Err(ApiError::too_large(max));
    }

    let request: SummarizeRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("invalid request body: {e}")))?;

    let defaults = state.summarizer.options();
    let options = match request.scale_factor {
        Some(scale) => defaults
            .with_scale_factor(scale)
            .map_err(|e| ApiError::bad_request(e.to_string()))?,
        None => defaults,
    };

    let summary = run_pipeline(state.summarizer, request.story, options).await?;
    Ok(Json(SummarizeResponse { summary }))
}

async fn run_pipeline(
    summarizer: Arc<Summarizer>,
    story: String,
    options: SummaryOptions,
) -> Result<String, ApiError> {
    let summary = tokio::task::spawn_blocking(move || summarizer.summarize_with(&story, options))
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "summarization task failed");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        })?;
    tracing::info!(
        outcome = summary.outcome.as_str(),
        total = summary.total_sentences,
        selected = summary.sentences.len(),
        "summarized request"
    );
    Ok(summary.text)
}
