//! Selection threshold.

use super::SentenceScores;
use crate::error::{SummaryError, SummaryResult};

/// Arithmetic mean of all sentence scores.
///
/// Returns [`SummaryError::NoMatches`] when no sentence was scored.
pub fn average(scores: &SentenceScores) -> SummaryResult<f64> {
    if scores.is_empty() {
        return Err(SummaryError::NoMatches);
    }
    let sum: f64 = scores.values().sum();
    Ok(sum / scores.len() as f64)
}
