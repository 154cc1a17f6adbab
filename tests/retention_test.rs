use strata::error::EngineError;
use strata::memory::retention::{MAX_EASE_FACTOR, MIN_EASE_FACTOR};
use strata::memory::{sm2_next, Quality, RetentionState};

#[test]
fn perfect_recall_raises_ease_and_blackout_lowers_it() {
    for ease in [1.3, 2.0, 2.5, 4.0] {
        let state = RetentionState {
            ease_factor: ease,
            ..RetentionState::default()
        };
        assert!(sm2_next(&state, Quality::Perfect).ease_factor > ease);
        if ease > MIN_EASE_FACTOR {
            assert!(sm2_next(&state, Quality::Blackout).ease_factor < ease);
        }
    }
}

#[test]
fn ease_floor_holds_after_repeated_blackouts() {
    let mut state = RetentionState::default();
    for _ in 0..10 {
        state = sm2_next(&state, Quality::Blackout);
        assert!(state.ease_factor >= MIN_EASE_FACTOR);
        assert!(state.ease_factor <= MAX_EASE_FACTOR);
    }
    assert_eq!(state.ease_factor, MIN_EASE_FACTOR);
}

#[test]
fn ease_ceiling_holds_after_repeated_perfect_recalls() {
    let mut state = RetentionState::default();
    for _ in 0..40 {
        state = sm2_next(&state, Quality::Perfect);
    }
    assert_eq!(state.ease_factor, MAX_EASE_FACTOR);
}

#[test]
fn strength_stays_in_unit_interval() {
    let high = RetentionState {
        strength: 0.99,
        ..RetentionState::default()
    };
    let next = sm2_next(&high, Quality::Perfect);
    assert!((0.0..=1.0).contains(&next.strength));
    assert_eq!(next.strength, 1.0);

    let low = RetentionState {
        strength: 0.01,
        ..RetentionState::default()
    };
    let next = sm2_next(&low, Quality::Blackout);
    assert!((0.0..=1.0).contains(&next.strength));
    assert!(next.strength < 0.01);
}

#[test]
fn every_transition_counts_once() {
    let mut state = RetentionState::default();
    for (i, raw) in [0u8, 5, 3, 1, 4, 2].into_iter().enumerate() {
        state = state.review(raw).unwrap();
        assert_eq!(state.recall_count, i as u32 + 1);
    }
}

#[test]
fn second_success_schedules_six_days() {
    let first = sm2_next(&RetentionState::default(), Quality::Difficult);
    let second = sm2_next(&first, Quality::Difficult);
    assert_eq!(first.interval, 1);
    assert_eq!(second.interval, 6);
}

#[test]
fn three_perfect_recalls_from_fresh_state() {
    let mut state = RetentionState::default();
    for _ in 0..3 {
        state = sm2_next(&state, Quality::Perfect);
        assert!(state.ease_factor >= 2.5);
    }
    assert_eq!(state.recall_count, 3);
    assert!(state.interval > 6);
    // round(6 × 2.8)
    assert_eq!(state.interval, 17);
}

#[test]
fn input_state_is_left_untouched() {
    let original = RetentionState::default();
    let snapshot = original;
    let _ = sm2_next(&original, Quality::Perfect);
    assert_eq!(original, snapshot);
}

#[test]
fn out_of_range_quality_is_an_error() {
    let err = RetentionState::default().review(7).unwrap_err();
    assert_eq!(err, EngineError::InvalidQuality(7));
    assert_eq!(err.to_string(), "recall quality must be between 0 and 5, got 7");
}

/// Store a state the way the persistence layer does: its four core fields only.
fn persist_core_fields(state: &RetentionState) -> String {
    let mut json = serde_json::to_value(state).unwrap();
    json.as_object_mut().unwrap().remove("streak");
    json.to_string()
}

#[test]
fn schedule_grows_across_json_round_trips() {
    let mut state = RetentionState::default();
    let mut intervals = Vec::new();
    for _ in 0..3 {
        let stored = serde_json::to_string(&state).unwrap();
        state = serde_json::from_str::<RetentionState>(&stored)
            .unwrap()
            .review(5)
            .unwrap();
        intervals.push(state.interval);
    }
    // 1, 6, then round(6 × 2.8)
    assert_eq!(intervals, [1, 6, 17]);
    assert_eq!(state.recall_count, 3);
}

#[test]
fn schedule_grows_when_only_core_fields_are_stored() {
    let mut state = RetentionState::default();
    let mut intervals = Vec::new();
    for _ in 0..4 {
        let stored = persist_core_fields(&state);
        assert!(!stored.contains("streak"));
        state = serde_json::from_str::<RetentionState>(&stored)
            .unwrap()
            .review(5)
            .unwrap();
        intervals.push(state.interval);
    }
    // ease 2.6, 2.7, 2.8, 2.9: 1, 6, round(6 × 2.8), round(17 × 2.9)
    assert_eq!(intervals, [1, 6, 17, 49]);
}

#[test]
fn grown_core_state_keeps_growing() {
    let state: RetentionState = serde_json::from_str(
        r#"{"easeFactor": 2.5, "interval": 15, "strength": 0.8, "recallCount": 3}"#,
    )
    .unwrap();
    let next = state.review(5).unwrap();
    // round(15 × 2.6)
    assert_eq!(next.interval, 39);
    assert_eq!(next.recall_count, 4);
}
