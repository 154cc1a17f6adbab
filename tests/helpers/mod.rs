#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use strata::memory::{EpisodicEntry, EpisodicTrace, ProceduralEntry, SemanticEntry};

/// Fixed reference clock so every score is reproducible.
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 10, 30, 0).unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    reference_now() - Duration::days(days)
}

/// An episodic entry with full strength and importance, created `days` ago.
pub fn episode(summary: &str, days: i64) -> EpisodicEntry {
    EpisodicEntry::raw(
        summary,
        EpisodicTrace {
            strength: 1.0,
            importance: 1.0,
            half_life_days: 30.0,
            created_at: Some(days_ago(days)),
        },
    )
}

/// `n` semantic entries with descending confidence and no timestamp.
pub fn patterns(n: usize) -> Vec<SemanticEntry> {
    (0..n)
        .map(|i| SemanticEntry::new(format!("pattern-{i}"), 1.0 - i as f64 * 0.01, 50))
        .collect()
}

/// `n` procedural entries with descending effectiveness and no usage.
pub fn strategies(n: usize) -> Vec<ProceduralEntry> {
    (0..n)
        .map(|i| ProceduralEntry::new(format!("strategy-{i}"), 0.9 - i as f64 * 0.01))
        .collect()
}

/// `n` episodic entries, one per day of age.
pub fn episodes(n: usize) -> Vec<EpisodicEntry> {
    (0..n).map(|i| episode(&format!("event-{i}"), i as i64)).collect()
}
