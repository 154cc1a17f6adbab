use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use strata::memory::RetentionState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewOutput {
    state: RetentionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_at: Option<DateTime<Utc>>,
}

/// Apply one SM-2 transition and print the new state.
pub fn review(
    quality: u8,
    state_json: Option<&str>,
    reviewed_at: Option<DateTime<Utc>>,
) -> Result<()> {
    let current: RetentionState = match state_json {
        Some(json) => serde_json::from_str(json).context("failed to parse retention state JSON")?,
        None => RetentionState::default(),
    };

    let next = current.review(quality).map_err(|e| {
        warn!("rejected review: {e}");
        e
    })?;

    super::print_json(&ReviewOutput {
        state: next,
        due_at: reviewed_at.map(|t| next.due_at(t)),
    })
}
