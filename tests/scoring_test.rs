mod helpers;

use helpers::{days_ago, episode, reference_now};
use strata::memory::{
    cross_layer_score, recency_bias, score_episodic_entry, score_procedural_entry,
    score_semantic_entry, EpisodicEntry, LayerScores, ProceduralEntry, SemanticEntry,
    DEFAULT_LAYER_WEIGHTS,
};

#[test]
fn recency_is_non_increasing_with_age() {
    let now = reference_now();
    let mut previous = f64::INFINITY;
    for hours in (0..=24 * 30).step_by(6) {
        let bias = recency_bias(Some(now - chrono::Duration::hours(hours)), now);
        assert!(bias <= previous, "bias rose at {hours}h");
        previous = bias;
    }
    assert_eq!(recency_bias(Some(days_ago(0)), now), 2.0);
    assert_eq!(recency_bias(Some(days_ago(15)), now), 1.0);
}

#[test]
fn precomputed_score_ignores_everything_else() {
    let now = reference_now();
    for value in [0.0, 0.33, 1.0, 12.5] {
        let entry = EpisodicEntry::precomputed("cached", value);
        assert_eq!(score_episodic_entry(&entry, now), value);
    }
}

#[test]
fn fresh_episode_outscores_stale_one() {
    let now = reference_now();
    let fresh = score_episodic_entry(&episode("today", 0), now);
    let stale = score_episodic_entry(&episode("last quarter", 90), now);
    // fresh: 1 × 1 × 1 × 2.0
    assert!((fresh - 2.0).abs() < 1e-12);
    // stale: three half-lives, no boost
    assert!((stale - 0.125).abs() < 1e-12);
}

#[test]
fn semantic_shrinkage_examples() {
    let now = reference_now();
    let thin = score_semantic_entry(&SemanticEntry::new("thin", 1.0, 1), now);
    assert!((thin - 0.625).abs() < 1e-12);

    let thick = score_semantic_entry(&SemanticEntry::new("thick", 0.9, 100), now);
    assert!((thick - 0.888).abs() < 1e-3);
}

#[test]
fn procedural_examples_are_exact() {
    assert_eq!(score_procedural_entry(&ProceduralEntry::new("untested", 0.8)), 0.8);
    assert_eq!(
        score_procedural_entry(&ProceduralEntry::new("proven", 0.5).with_usage(10, 8)),
        0.75
    );
}

#[test]
fn procedural_data_weight_saturates_at_ten_runs() {
    let at_ten = ProceduralEntry::new("a", 0.1).with_usage(10, 10);
    let at_fifty = ProceduralEntry::new("b", 0.1).with_usage(50, 50);
    assert!((score_procedural_entry(&at_ten) - 11.0 / 12.0).abs() < 1e-12);
    assert!((score_procedural_entry(&at_fifty) - 51.0 / 52.0).abs() < 1e-12);
}

#[test]
fn cross_layer_examples() {
    let w = DEFAULT_LAYER_WEIGHTS;
    assert_eq!(cross_layer_score(&LayerScores::default(), &w), 0.0);
    assert_eq!(
        cross_layer_score(
            &LayerScores {
                episodic: vec![0.8],
                ..Default::default()
            },
            &w
        ),
        0.8
    );
    assert_eq!(
        cross_layer_score(
            &LayerScores {
                episodic: vec![0.5, 1.0],
                ..Default::default()
            },
            &w
        ),
        0.75
    );
}

#[test]
fn cross_layer_blends_all_three_layers() {
    let scores = LayerScores {
        episodic: vec![1.0],
        semantic: Some(0.5),
        procedural: Some(0.0),
    };
    // (0.35 × 1.0 + 0.30 × 0.5) / 0.90
    let expected = (0.35 + 0.15) / 0.9;
    let combined = cross_layer_score(&scores, &DEFAULT_LAYER_WEIGHTS);
    assert!((combined - expected).abs() < 1e-12, "got {combined}");
}
