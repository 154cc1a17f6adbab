//! Boundary validation errors.
//!
//! Scoring and ranking are total over their input domain and never fail. The
//! only rejections happen when a caller hands the engine a value outside its
//! documented range: a recall quality above 5, or a layer weight table that
//! breaks the sum-to-one invariant.

use crate::memory::types::MemoryLayer;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Recall quality outside `0..=5`.
    #[error("recall quality must be between 0 and 5, got {0}")]
    InvalidQuality(u8),

    /// The four layer weights do not sum to 1.0.
    #[error("layer weights must sum to 1.0, got {sum}")]
    InvalidLayerWeights { sum: f64 },

    /// A single layer weight is negative, NaN, or infinite.
    #[error("weight for the {layer} layer must be a finite non-negative number, got {weight}")]
    NegativeLayerWeight { layer: MemoryLayer, weight: f64 },
}
