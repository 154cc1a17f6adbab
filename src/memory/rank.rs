//! Top-K selection across the scored layers.
//!
//! Each layer is scored and sorted on its own, then the `top_k` slots are
//! split between the layers that have entries, proportionally to their
//! weights. Slots a layer cannot fill are handed to layers that still have
//! unselected entries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::memory::score::{score_episodic_entry, score_procedural_entry, score_semantic_entry};
use crate::memory::types::{
    EpisodicEntry, MemoryBundle, MemoryLayer, ProceduralEntry, Scored, SemanticEntry,
    WorkingMemoryEntry,
};
use crate::memory::weights::LayerWeights;

/// Knobs for [`rank_memories`].
#[derive(Debug, Clone)]
pub struct RankOptions {
    /// Total number of entries to select across all scored layers.
    pub top_k: usize,
    /// Reference clock. `None` means the time of the call.
    pub now: Option<DateTime<Utc>>,
    pub weights: LayerWeights,
}

impl RankOptions {
    pub fn new(top_k: usize) -> Self {
        Self {
            top_k,
            now: None,
            weights: LayerWeights::default(),
        }
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn with_weights(mut self, weights: LayerWeights) -> Self {
        self.weights = weights;
        self
    }
}

/// Output of [`rank_memories`]: one descending list per scored layer, plus
/// the working-memory entries passed through untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedMemories {
    pub ranked_episodic: Vec<Scored<EpisodicEntry>>,
    pub ranked_semantic: Vec<Scored<SemanticEntry>>,
    pub ranked_procedural: Vec<Scored<ProceduralEntry>>,
    pub working: Vec<WorkingMemoryEntry>,
}

impl RankedMemories {
    /// Number of entries selected across the three scored layers.
    pub fn selected(&self) -> usize {
        self.ranked_episodic.len() + self.ranked_semantic.len() + self.ranked_procedural.len()
    }
}

/// Score every entry, sort each layer, and keep a weight-proportional share
/// of `top_k` from each.
pub fn rank_memories(bundle: &MemoryBundle, options: &RankOptions) -> RankedMemories {
    let now = options.now.unwrap_or_else(Utc::now);

    let episodic = sort_scored(&bundle.episodic, |e| score_episodic_entry(e, now));
    let semantic = sort_scored(&bundle.semantic, |e| score_semantic_entry(e, now));
    let procedural = sort_scored(&bundle.procedural, score_procedural_entry);

    let capacity = MemoryLayer::SCORED.map(|layer| LayerCapacity {
        weight: options.weights.get(layer),
        available: bundle.len_of(layer),
    });
    let [episodic_slots, semantic_slots, procedural_slots] =
        allocate_slots(options.top_k, &capacity);

    debug!(
        top_k = options.top_k,
        episodic = episodic_slots,
        semantic = semantic_slots,
        procedural = procedural_slots,
        "allocated ranking slots"
    );

    RankedMemories {
        ranked_episodic: take(episodic, episodic_slots),
        ranked_semantic: take(semantic, semantic_slots),
        ranked_procedural: take(procedural, procedural_slots),
        working: bundle.working.clone(),
    }
}

fn sort_scored<T: Clone>(entries: &[T], score: impl Fn(&T) -> f64) -> Vec<Scored<T>> {
    let mut scored: Vec<Scored<T>> = entries
        .iter()
        .map(|e| Scored {
            entry: e.clone(),
            score: score(e),
        })
        .collect();
    // sort_by is stable: equal scores keep input order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

fn take<T>(mut sorted: Vec<T>, slots: usize) -> Vec<T> {
    sorted.truncate(slots);
    sorted
}

// ── Slot allocation ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct LayerCapacity {
    weight: f64,
    available: usize,
}

/// Split `top_k` slots over the scored layers.
///
/// 1. Each layer with entries gets `round(top_k × w / Σw)`, capped at what it
///    holds. Σw runs over non-empty layers only.
/// 2. If rounding overshoots `top_k`, the most over-rounded layer gives back
///    one slot until the total fits.
/// 3. Any shortfall is spread over layers with spare entries by ceiling of
///    their weight share, heaviest first. Every round either covers the
///    shortfall or exhausts at least one layer, so one round per layer is
///    enough to reach a fixed point.
///
/// The result sums to `min(top_k, total entries)`.
fn allocate_slots(top_k: usize, capacity: &[LayerCapacity; 3]) -> [usize; 3] {
    let mut slots = [0usize; 3];
    if top_k == 0 {
        return slots;
    }

    let present_weight: f64 = capacity
        .iter()
        .filter(|c| c.available > 0)
        .map(|c| c.weight)
        .sum();

    if present_weight > 0.0 {
        let quotas = capacity.map(|c| {
            if c.available > 0 {
                top_k as f64 * c.weight / present_weight
            } else {
                0.0
            }
        });
        for i in 0..3 {
            slots[i] = (quotas[i].round() as usize).min(capacity[i].available);
        }
        trim_overshoot(top_k, &quotas, &mut slots);
    }

    for _ in 0..capacity.len() {
        let shortfall = top_k.saturating_sub(slots.iter().sum());
        if shortfall == 0 {
            break;
        }
        let mut spare: Vec<usize> = (0..3)
            .filter(|&i| capacity[i].available > slots[i])
            .collect();
        if spare.is_empty() {
            break;
        }
        spare.sort_by(|&a, &b| capacity[b].weight.total_cmp(&capacity[a].weight));

        let spare_weight: f64 = spare.iter().map(|&i| capacity[i].weight).sum();
        let mut remaining = shortfall;
        for &i in &spare {
            if remaining == 0 {
                break;
            }
            let share = if spare_weight > 0.0 {
                shortfall as f64 * capacity[i].weight / spare_weight
            } else {
                shortfall as f64 / spare.len() as f64
            };
            let extra = (share.ceil() as usize)
                .min(capacity[i].available - slots[i])
                .min(remaining);
            slots[i] += extra;
            remaining -= extra;
        }
    }

    slots
}

fn trim_overshoot(top_k: usize, quotas: &[f64; 3], slots: &mut [usize; 3]) {
    while slots.iter().sum::<usize>() > top_k {
        let most_over = (0..3)
            .filter(|&i| slots[i] > 0)
            .max_by(|&a, &b| {
                let over_a = slots[a] as f64 - quotas[a];
                let over_b = slots[b] as f64 - quotas[b];
                over_a.total_cmp(&over_b)
            });
        match most_over {
            Some(i) => slots[i] -= 1,
            None => break,
        }
    }
}
