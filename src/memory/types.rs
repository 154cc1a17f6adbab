//! Memory record definitions.
//!
//! Defines [`MemoryLayer`] (the four memory layers), the read-only records the
//! persistence layer hands to the engine ([`EpisodicEntry`], [`SemanticEntry`],
//! [`ProceduralEntry`], [`WorkingMemoryEntry`]), the [`MemoryBundle`] that
//! carries one tenant's records, and [`Scored`], a record paired with its
//! computed relevance.
//!
//! Records use camelCase field names on the wire. Every optional numeric field
//! has an explicit default, so scorers always read fully-populated values.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default `strength` and `importance` of an episodic trace.
pub const DEFAULT_EPISODIC_WEIGHT: f64 = 0.5;
/// Default half-life of an episodic trace, in days.
pub const DEFAULT_HALF_LIFE_DAYS: f64 = 30.0;
/// Default prior `effectiveness` of a procedural strategy.
pub const DEFAULT_EFFECTIVENESS: f64 = 0.5;

/// The four memory layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryLayer {
    /// Specific past events and their outcomes.
    Episodic,
    /// Statistically-learned patterns.
    Semantic,
    /// Reusable strategies with a track record.
    Procedural,
    /// Ephemeral session state. Carried through, never scored.
    Working,
}

impl MemoryLayer {
    /// Layers that take part in scoring, ranking, and cross-layer composition.
    pub const SCORED: [MemoryLayer; 3] = [Self::Episodic, Self::Semantic, Self::Procedural];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Episodic => "episodic",
            Self::Semantic => "semantic",
            Self::Procedural => "procedural",
            Self::Working => "working",
        }
    }
}

impl std::fmt::Display for MemoryLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MemoryLayer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "episodic" => Ok(Self::Episodic),
            "semantic" => Ok(Self::Semantic),
            "procedural" => Ok(Self::Procedural),
            "working" => Ok(Self::Working),
            _ => Err(format!("unknown memory layer: {s}")),
        }
    }
}

// ── Episodic ──────────────────────────────────────────────────────────────────

/// Something that happened, e.g. the outcome of a published post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EpisodicEntry {
    /// Free-text description. Not interpreted by the engine.
    #[serde(default)]
    pub summary: String,
    /// Kind of event. Opaque to scoring.
    #[serde(default)]
    pub event_type: String,
    /// Score computed earlier by the caller. When set it is returned verbatim
    /// and the trace is not consulted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite_score: Option<f64>,
    /// Decay inputs. Kept even when `composite_score` is set, so ranked
    /// output still carries the entry's timestamps.
    #[serde(flatten)]
    pub trace: EpisodicTrace,
}

/// What an episodic entry is scored from, as selected by
/// [`EpisodicEntry::signal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EpisodicSignal<'a> {
    Precomputed(f64),
    Raw(&'a EpisodicTrace),
}

/// Raw inputs to half-life decay scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct EpisodicTrace {
    /// Durability of the memory, in `[0, 1]`.
    pub strength: f64,
    /// Salience assigned at creation, in `[0, 1]`.
    pub importance: f64,
    /// Days for the decay factor to halve.
    pub half_life_days: f64,
    /// Creation time. `None` means "now", so no decay applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Default for EpisodicTrace {
    fn default() -> Self {
        Self {
            strength: DEFAULT_EPISODIC_WEIGHT,
            importance: DEFAULT_EPISODIC_WEIGHT,
            half_life_days: DEFAULT_HALF_LIFE_DAYS,
            created_at: None,
        }
    }
}

impl EpisodicEntry {
    /// An entry scored from raw decay inputs.
    pub fn raw(summary: impl Into<String>, trace: EpisodicTrace) -> Self {
        Self {
            summary: summary.into(),
            event_type: String::new(),
            composite_score: None,
            trace,
        }
    }

    /// An entry whose score was computed earlier and is returned as-is.
    pub fn precomputed(summary: impl Into<String>, composite_score: f64) -> Self {
        Self {
            summary: summary.into(),
            event_type: String::new(),
            composite_score: Some(composite_score),
            trace: EpisodicTrace::default(),
        }
    }

    pub fn signal(&self) -> EpisodicSignal<'_> {
        match self.composite_score {
            Some(score) => EpisodicSignal::Precomputed(score),
            None => EpisodicSignal::Raw(&self.trace),
        }
    }
}

// ── Semantic ──────────────────────────────────────────────────────────────────

/// A learned pattern: "X correlates with Y".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SemanticEntry {
    #[serde(default)]
    pub pattern_type: String,
    #[serde(default)]
    pub pattern_key: String,
    /// Arbitrary payload. Opaque to scoring.
    #[serde(default)]
    pub pattern_value: serde_json::Value,
    /// The entry's own belief strength, in `[0, 1]`.
    pub confidence: f64,
    /// Number of observations behind `confidence`.
    #[serde(default)]
    pub sample_size: u32,
    /// Last time the pattern was revised. `None` disables the recency boost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SemanticEntry {
    pub fn new(pattern_key: impl Into<String>, confidence: f64, sample_size: u32) -> Self {
        Self {
            pattern_type: String::new(),
            pattern_key: pattern_key.into(),
            pattern_value: serde_json::Value::Null,
            confidence,
            sample_size,
            updated_at: None,
        }
    }
}

// ── Procedural ────────────────────────────────────────────────────────────────

/// A reusable strategy and its usage record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProceduralEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub strategy_type: String,
    /// Prior belief in the strategy before usage data accumulates.
    #[serde(default = "default_effectiveness")]
    pub effectiveness: f64,
    #[serde(default)]
    pub times_applied: u32,
    #[serde(default)]
    pub times_succeeded: u32,
}

fn default_effectiveness() -> f64 {
    DEFAULT_EFFECTIVENESS
}

impl ProceduralEntry {
    pub fn new(name: impl Into<String>, effectiveness: f64) -> Self {
        Self {
            name: name.into(),
            strategy_type: String::new(),
            effectiveness,
            times_applied: 0,
            times_succeeded: 0,
        }
    }

    pub fn with_usage(mut self, times_applied: u32, times_succeeded: u32) -> Self {
        self.times_applied = times_applied;
        self.times_succeeded = times_succeeded;
        self
    }
}

// ── Working ───────────────────────────────────────────────────────────────────

/// Ephemeral session state such as the active configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkingMemoryEntry {
    pub key: String,
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// ── Bundles ───────────────────────────────────────────────────────────────────

/// All records of one tenant, as read from the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MemoryBundle {
    pub episodic: Vec<EpisodicEntry>,
    pub semantic: Vec<SemanticEntry>,
    pub procedural: Vec<ProceduralEntry>,
    pub working: Vec<WorkingMemoryEntry>,
}

impl MemoryBundle {
    /// Number of entries in a layer.
    pub fn len_of(&self, layer: MemoryLayer) -> usize {
        match layer {
            MemoryLayer::Episodic => self.episodic.len(),
            MemoryLayer::Semantic => self.semantic.len(),
            MemoryLayer::Procedural => self.procedural.len(),
            MemoryLayer::Working => self.working.len(),
        }
    }
}

/// A record together with its computed relevance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scored<T> {
    #[serde(flatten)]
    pub entry: T,
    pub score: f64,
}
