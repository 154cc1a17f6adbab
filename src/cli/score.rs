use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use strata::config::StrataConfig;
use strata::memory::{
    cross_layer_score, score_episodic_entry, score_procedural_entry, score_semantic_entry,
    LayerScores,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreReport {
    episodic: Vec<f64>,
    semantic: Vec<f64>,
    procedural: Vec<f64>,
    cross_layer: f64,
}

/// Score every entry of a bundle file and print the combined score.
///
/// Semantic and procedural layers are reduced to the mean of their entries
/// before composition.
pub fn score(config: &StrataConfig, file: &Path, now: Option<DateTime<Utc>>) -> Result<()> {
    let bundle = super::read_bundle(file)?;
    let now = now.unwrap_or_else(Utc::now);

    let episodic: Vec<f64> = bundle
        .episodic
        .iter()
        .map(|e| score_episodic_entry(e, now))
        .collect();
    let semantic: Vec<f64> = bundle
        .semantic
        .iter()
        .map(|e| score_semantic_entry(e, now))
        .collect();
    let procedural: Vec<f64> = bundle.procedural.iter().map(score_procedural_entry).collect();

    let layers = LayerScores {
        episodic: episodic.clone(),
        semantic: mean(&semantic),
        procedural: mean(&procedural),
    };
    let cross_layer = cross_layer_score(&layers, &config.ranking.weights);

    super::print_json(&ScoreReport {
        episodic,
        semantic,
        procedural,
        cross_layer,
    })
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
