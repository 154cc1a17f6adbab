//! Scoring, ranking, and retention over the four memory layers.

pub mod rank;
pub mod retention;
pub mod score;
pub mod types;
pub mod weights;

pub use rank::{rank_memories, RankOptions, RankedMemories};
pub use retention::{sm2_next, Quality, RetentionState};
pub use score::{
    cross_layer_score, recency_bias, score_episodic_entry, score_procedural_entry,
    score_semantic_entry, LayerScores,
};
pub use types::{
    EpisodicEntry, EpisodicSignal, EpisodicTrace, MemoryBundle, MemoryLayer, ProceduralEntry,
    Scored, SemanticEntry, WorkingMemoryEntry,
};
pub use weights::{LayerWeights, DEFAULT_LAYER_WEIGHTS};
