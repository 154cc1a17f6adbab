//! SM-2 spaced-repetition transitions for memory retention.
//!
//! A [`RetentionState`] is never mutated in place. [`sm2_next`] takes a
//! snapshot and a recall [`Quality`] and returns the next state, which the
//! caller persists. Two writers advancing the same snapshot will lose one of
//! the updates, so callers serialize reviews per memory.

use chrono::{DateTime, Duration, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const INITIAL_EASE_FACTOR: f64 = 2.5;
pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const MAX_EASE_FACTOR: f64 = 5.0;
pub const INITIAL_STRENGTH: f64 = 0.5;

/// Interval after the second successful review in a row, in days.
const SECOND_REVIEW_INTERVAL: u32 = 6;

/// Recall quality on the SM-2 0–5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Quality {
    /// Complete blackout.
    Blackout = 0,
    /// Wrong, but the answer was familiar once shown.
    Wrong = 1,
    /// Wrong, but the answer came easily once shown.
    AlmostRight = 2,
    /// Right with serious difficulty.
    Difficult = 3,
    /// Right after some hesitation.
    Hesitant = 4,
    /// Perfect recall.
    Perfect = 5,
}

impl Quality {
    pub fn value(self) -> u8 {
        self as u8
    }

    /// 3 and above count as a successful review.
    pub fn is_success(self) -> bool {
        self >= Quality::Difficult
    }
}

impl TryFrom<u8> for Quality {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Blackout),
            1 => Ok(Self::Wrong),
            2 => Ok(Self::AlmostRight),
            3 => Ok(Self::Difficult),
            4 => Ok(Self::Hesitant),
            5 => Ok(Self::Perfect),
            other => Err(EngineError::InvalidQuality(other)),
        }
    }
}

impl From<Quality> for u8 {
    fn from(q: Quality) -> Self {
        q.value()
    }
}

/// Retention state of one episodic or procedural memory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RetentionState {
    /// Growth multiplier for review intervals, in `[1.3, 5.0]`.
    pub ease_factor: f64,
    /// Days until the next scheduled reinforcement, at least 1.
    pub interval: u32,
    /// Durability of the memory, in `[0, 1]`. Feeds episodic scoring.
    pub strength: f64,
    /// Number of transitions applied, successful or not.
    pub recall_count: u32,
    /// Consecutive successful reviews. Reset by any quality below 3. States
    /// stored without it are read through [`RetentionState::successes_in_a_row`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak: Option<u32>,
}

impl Default for RetentionState {
    fn default() -> Self {
        Self {
            ease_factor: INITIAL_EASE_FACTOR,
            interval: 1,
            strength: INITIAL_STRENGTH,
            recall_count: 0,
            streak: None,
        }
    }
}

impl RetentionState {
    /// Apply a raw 0–5 quality, rejecting anything outside that range.
    pub fn review(&self, quality: u8) -> Result<Self, EngineError> {
        Ok(sm2_next(self, Quality::try_from(quality)?))
    }

    /// Consecutive successful reviews leading up to this state.
    ///
    /// Without a stored streak it is inferred from the other fields: nothing
    /// has happened yet at `recall_count == 0`, an interval above 1 is only
    /// reached after two or more successes in a row, and an interval of 1
    /// after earlier reviews counts as one success.
    pub fn successes_in_a_row(&self) -> u32 {
        match self.streak {
            Some(streak) => streak,
            None if self.recall_count == 0 => 0,
            None if self.interval > 1 => 2,
            None => 1,
        }
    }

    /// When the next reinforcement is due, given the time of the last review.
    pub fn due_at(&self, reviewed_at: DateTime<Utc>) -> DateTime<Utc> {
        reviewed_at
            .checked_add_signed(Duration::days(i64::from(self.interval.max(1))))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Advance `state` by one observed recall.
///
/// Order: strength, then ease factor, then interval (which uses the new ease
/// factor), then the recall counter.
pub fn sm2_next(state: &RetentionState, quality: Quality) -> RetentionState {
    let strength = next_strength(state.strength, quality);
    let ease_factor = next_ease_factor(state.ease_factor, quality);

    let (interval, streak) = if quality.is_success() {
        let streak = state.successes_in_a_row().saturating_add(1);
        let interval = match streak {
            1 => 1,
            2 => SECOND_REVIEW_INTERVAL,
            _ => {
                let grown = (f64::from(state.interval.max(1)) * ease_factor).round();
                (grown as u32).max(1)
            }
        };
        (interval, streak)
    } else {
        (1, 0)
    };

    RetentionState {
        ease_factor,
        interval,
        strength,
        recall_count: state.recall_count.saturating_add(1),
        streak: Some(streak),
    }
}

fn next_strength(strength: f64, quality: Quality) -> f64 {
    let strength = if strength.is_finite() {
        strength
    } else {
        INITIAL_STRENGTH
    };
    let next = match quality {
        Quality::Blackout | Quality::Wrong => strength * 0.7,
        Quality::AlmostRight => strength * 0.9,
        Quality::Difficult => strength + 0.05,
        Quality::Hesitant => strength + 0.10,
        Quality::Perfect => strength + 0.15,
    };
    next.clamp(0.0, 1.0)
}

fn next_ease_factor(ease_factor: f64, quality: Quality) -> f64 {
    let ease_factor = if ease_factor.is_finite() {
        ease_factor
    } else {
        INITIAL_EASE_FACTOR
    };
    let miss = f64::from(5 - quality.value());
    let delta = 0.1 - miss * (0.08 + miss * 0.02);
    (ease_factor + delta).clamp(MIN_EASE_FACTOR, MAX_EASE_FACTOR)
}
