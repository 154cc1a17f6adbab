//! Per-layer relevance scorers and cross-layer composition.
//!
//! All scorers are pure: the reference clock is passed in explicitly and no
//! input is mutated. Out-of-range or non-finite record fields are sanitized to
//! their documented defaults instead of failing.

use chrono::{DateTime, Utc};

use crate::memory::types::{
    EpisodicEntry, EpisodicSignal, MemoryLayer, ProceduralEntry, SemanticEntry,
    DEFAULT_EFFECTIVENESS, DEFAULT_EPISODIC_WEIGHT, DEFAULT_HALF_LIFE_DAYS,
};
use crate::memory::weights::LayerWeights;

/// Neutral prior that semantic confidence is shrunk toward.
pub const SEMANTIC_PRIOR_MEAN: f64 = 0.5;
/// Pseudo-observations backing the semantic prior.
pub const SEMANTIC_PRIOR_WEIGHT: f64 = 3.0;
/// Applications after which a procedural strategy's own record fully
/// replaces its prior effectiveness.
pub const PROCEDURAL_FULL_CONFIDENCE_RUNS: f64 = 10.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// `(upper age bound in days, multiplier)`, checked in order.
const RECENCY_BUCKETS: [(f64, f64); 4] = [(1.0, 2.0), (3.0, 1.5), (7.0, 1.2), (14.0, 1.1)];

/// Age of `timestamp` relative to `now`, in fractional days. Timestamps in the
/// future count as age 0.
pub fn age_days(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - timestamp).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).max(0.0)
}

/// Step-function boost for fresh records: 2.0 under a day, falling to 1.0 past
/// two weeks. A bucket boundary belongs to the older bucket. A missing
/// timestamp is neutral (1.0).
pub fn recency_bias(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(ts) = timestamp else {
        return 1.0;
    };
    let age = age_days(ts, now);
    RECENCY_BUCKETS
        .iter()
        .find(|(bound, _)| age < *bound)
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(1.0)
}

/// `strength × importance × 0.5^(age / halfLife) × recency`, or the
/// precomputed score verbatim.
pub fn score_episodic_entry(entry: &EpisodicEntry, now: DateTime<Utc>) -> f64 {
    let trace = match entry.signal() {
        EpisodicSignal::Precomputed(score) => return score,
        EpisodicSignal::Raw(trace) => trace,
    };

    let strength = unit_or(trace.strength, DEFAULT_EPISODIC_WEIGHT);
    let importance = unit_or(trace.importance, DEFAULT_EPISODIC_WEIGHT);
    let half_life = if trace.half_life_days.is_finite() && trace.half_life_days > 0.0 {
        trace.half_life_days
    } else {
        DEFAULT_HALF_LIFE_DAYS
    };

    let age = trace.created_at.map(|ts| age_days(ts, now)).unwrap_or(0.0);
    let decay = 0.5_f64.powf(age / half_life);

    strength * importance * decay * recency_bias(trace.created_at, now)
}

/// Bayesian-shrunk confidence times recency. Few observations pull the score
/// toward [`SEMANTIC_PRIOR_MEAN`]; many let it converge on `confidence`.
pub fn score_semantic_entry(entry: &SemanticEntry, now: DateTime<Utc>) -> f64 {
    let confidence = unit_or(entry.confidence, SEMANTIC_PRIOR_MEAN);
    let n = entry.sample_size as f64;
    let effective = (SEMANTIC_PRIOR_MEAN * SEMANTIC_PRIOR_WEIGHT + confidence * n)
        / (SEMANTIC_PRIOR_WEIGHT + n);
    effective * recency_bias(entry.updated_at, now)
}

/// Prior effectiveness blended with the Laplace-smoothed success rate,
/// weighted by how much usage data exists. No time decay.
pub fn score_procedural_entry(entry: &ProceduralEntry) -> f64 {
    let effectiveness = unit_or(entry.effectiveness, DEFAULT_EFFECTIVENESS);
    let applied = entry.times_applied as f64;
    // A success count above the application count is a bookkeeping error upstream.
    let succeeded = entry.times_succeeded.min(entry.times_applied) as f64;

    let success_rate = (succeeded + 1.0) / (applied + 2.0);
    let data_weight = (applied / PROCEDURAL_FULL_CONFIDENCE_RUNS).min(1.0);

    (1.0 - data_weight) * effectiveness + data_weight * success_rate
}

/// Per-layer inputs to [`cross_layer_score`]. An empty `episodic` vector or a
/// `None` scalar marks the layer as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerScores {
    pub episodic: Vec<f64>,
    pub semantic: Option<f64>,
    pub procedural: Option<f64>,
}

impl LayerScores {
    /// The representative value each present layer contributes.
    pub fn contributions(&self) -> Vec<(MemoryLayer, f64)> {
        let mut out = Vec::with_capacity(3);
        if !self.episodic.is_empty() {
            let mean = self.episodic.iter().sum::<f64>() / self.episodic.len() as f64;
            out.push((MemoryLayer::Episodic, mean));
        }
        if let Some(s) = self.semantic {
            out.push((MemoryLayer::Semantic, s));
        }
        if let Some(p) = self.procedural {
            out.push((MemoryLayer::Procedural, p));
        }
        out
    }
}

/// Weighted average of the present layers, with weights re-normalized over
/// those layers only. Returns 0 when no layer is present.
///
/// If every present layer has weight 0, the layers count equally.
pub fn cross_layer_score(scores: &LayerScores, weights: &LayerWeights) -> f64 {
    let contributions = scores.contributions();
    if contributions.is_empty() {
        return 0.0;
    }

    let total: f64 = contributions.iter().map(|(layer, _)| weights.get(*layer)).sum();
    if total <= 0.0 {
        return contributions.iter().map(|(_, v)| v).sum::<f64>() / contributions.len() as f64;
    }

    contributions
        .iter()
        .map(|(layer, value)| (weights.get(*layer) / total) * value)
        .sum()
}

/// Clamp a unit-interval field, substituting `default` for NaN or infinity.
fn unit_or(value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        default
    }
}
