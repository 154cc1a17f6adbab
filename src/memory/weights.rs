//! Per-layer weights used by cross-layer composition and top-K allocation.
//!
//! [`LayerWeights`] can only be built through [`LayerWeights::new`] (or
//! deserialized, which goes through the same check), so a weight table that
//! does not sum to 1.0 never reaches the scorer.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::memory::types::MemoryLayer;

/// Allowed distance between the weight sum and 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Shipped weight table. Working memory holds a share of the sum but never
/// takes part in scoring.
pub const DEFAULT_LAYER_WEIGHTS: LayerWeights = LayerWeights {
    episodic: 0.35,
    semantic: 0.30,
    procedural: 0.25,
    working: 0.10,
};

const _: () = {
    let w = DEFAULT_LAYER_WEIGHTS;
    assert!(w.episodic >= 0.0 && w.semantic >= 0.0 && w.procedural >= 0.0 && w.working >= 0.0);
    let sum = w.episodic + w.semantic + w.procedural + w.working;
    assert!(
        sum > 1.0 - WEIGHT_SUM_TOLERANCE && sum < 1.0 + WEIGHT_SUM_TOLERANCE,
        "DEFAULT_LAYER_WEIGHTS must sum to 1.0"
    );
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WeightTable")]
pub struct LayerWeights {
    episodic: f64,
    semantic: f64,
    procedural: f64,
    working: f64,
}

/// Unvalidated wire form of [`LayerWeights`].
#[derive(Debug, Deserialize)]
#[serde(default)]
struct WeightTable {
    episodic: f64,
    semantic: f64,
    procedural: f64,
    working: f64,
}

impl Default for WeightTable {
    fn default() -> Self {
        let d = DEFAULT_LAYER_WEIGHTS;
        Self {
            episodic: d.episodic,
            semantic: d.semantic,
            procedural: d.procedural,
            working: d.working,
        }
    }
}

impl TryFrom<WeightTable> for LayerWeights {
    type Error = EngineError;

    fn try_from(t: WeightTable) -> Result<Self, Self::Error> {
        LayerWeights::new(t.episodic, t.semantic, t.procedural, t.working)
    }
}

impl Default for LayerWeights {
    fn default() -> Self {
        DEFAULT_LAYER_WEIGHTS
    }
}

impl LayerWeights {
    /// Build a validated weight table.
    pub fn new(
        episodic: f64,
        semantic: f64,
        procedural: f64,
        working: f64,
    ) -> Result<Self, EngineError> {
        let weights = Self {
            episodic,
            semantic,
            procedural,
            working,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Check that every weight is finite and non-negative and that the four
    /// sum to 1.0 within [`WEIGHT_SUM_TOLERANCE`].
    pub fn validate(&self) -> Result<(), EngineError> {
        for layer in [
            MemoryLayer::Episodic,
            MemoryLayer::Semantic,
            MemoryLayer::Procedural,
            MemoryLayer::Working,
        ] {
            let weight = self.get(layer);
            if !weight.is_finite() || weight < 0.0 {
                return Err(EngineError::NegativeLayerWeight { layer, weight });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EngineError::InvalidLayerWeights { sum });
        }
        Ok(())
    }

    pub fn get(&self, layer: MemoryLayer) -> f64 {
        match layer {
            MemoryLayer::Episodic => self.episodic,
            MemoryLayer::Semantic => self.semantic,
            MemoryLayer::Procedural => self.procedural,
            MemoryLayer::Working => self.working,
        }
    }

    pub fn sum(&self) -> f64 {
        self.episodic + self.semantic + self.procedural + self.working
    }
}
