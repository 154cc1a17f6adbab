use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::info;

use strata::config::StrataConfig;
use strata::memory::{rank_memories, RankOptions};

/// Rank a bundle file and print the per-layer selection.
pub fn rank(
    config: &StrataConfig,
    file: &Path,
    top_k: Option<usize>,
    now: Option<DateTime<Utc>>,
) -> Result<()> {
    let bundle = super::read_bundle(file)?;

    let mut options = RankOptions::new(top_k.unwrap_or(config.ranking.top_k))
        .with_weights(config.ranking.weights);
    if let Some(now) = now {
        options = options.at(now);
    }

    let ranked = rank_memories(&bundle, &options);
    info!(
        selected = ranked.selected(),
        top_k = options.top_k,
        "ranked {}",
        file.display()
    );

    super::print_json(&ranked)
}
