mod common;

use common::*;
use gridiron_core::Position;
use gridiron_engines::{Mode, Optimizer};

fn wide_optimizer() -> gridiron_engines::OptimizerBuilder {
    Optimizer::builder()
        .rows(wide_rows())
        .salary_cap(50_000)
        .flex_positions([
            Position::new("RB"),
            Position::new("WR"),
            Position::new("TE"),
        ])
}

fn flex() -> Vec<Position> {
    vec![
        Position::new("RB"),
        Position::new("WR"),
        Position::new("TE"),
    ]
}

#[test]
fn post_processing_returns_diverse_lineups() {
    let optimizer = wide_optimizer()
        .seed(42)
        .population_size(600)
        .n_generations(15)
        .stop_criteria(15)
        .target_lineups(8)
        .mode(Mode::PostProcessing)
        .diversity_weight(0.3)
        .min_overlap_threshold(0.3)
        .build()
        .unwrap();

    let outcome = optimizer.run().unwrap();

    let lineups = outcome.lineups.as_ref().unwrap();
    let scores = outcome.scores.as_ref().unwrap();
    let metrics = outcome.diversity_metrics.as_ref().unwrap();

    assert_eq!(lineups.len(), 8);
    assert_eq!(scores.len(), 8);

    // the first multilineup pick is the single-lineup best
    assert_eq!(scores[0], outcome.best_score);
    assert_eq!(&lineups[0], &outcome.best_lineup);

    // the promised diversity bound, unless relaxation was flagged
    if !outcome.diversity_relaxed {
        assert!(
            metrics.max_overlap <= 1.0 - 0.3 + 1e-6,
            "max overlap {} over bound",
            metrics.max_overlap
        );
    }

    for row in lineups {
        assert_valid_lineup(optimizer.pool(), row, 50_000);
    }

    assert_eq!(metrics.pairwise_matrix.len(), 8);
}

#[test]
fn post_processing_shortfall_is_flagged_not_fatal() {
    // a population this tiny cannot yield 50 lineups
    let optimizer = wide_optimizer()
        .seed(9)
        .population_size(20)
        .n_generations(3)
        .stop_criteria(3)
        .target_lineups(50)
        .mode(Mode::PostProcessing)
        .build()
        .unwrap();

    let outcome = optimizer.run().unwrap();
    let lineups = outcome.lineups.as_ref().unwrap();

    assert!(lineups.len() < 50);
    assert!(outcome.diversity_shortfall);
}

#[test]
fn set_based_returns_exactly_the_requested_lineups() {
    let optimizer = wide_optimizer()
        .seed(1)
        .population_size(30)
        .n_generations(12)
        .stop_criteria(12)
        .target_lineups(6)
        .lineup_pool_size(1_500)
        .mode(Mode::SetBased)
        .build()
        .unwrap();

    let outcome = optimizer.run().unwrap();

    let lineups = outcome.lineups.as_ref().unwrap();
    let scores = outcome.scores.as_ref().unwrap();
    assert_eq!(lineups.len(), 6);
    assert_eq!(scores.len(), 6);

    // scores come back best-first and match the headline fields
    assert_eq!(scores[0], outcome.best_score);
    for pair in scores.windows(2) {
        assert!(pair[0] >= pair[1]);
    }

    // every lineup individually valid, slots intact, set distinct
    let mut keys = Vec::new();
    for row in lineups {
        assert_valid_lineup(optimizer.pool(), row, 50_000);
        assert_slot_integrity(
            optimizer.pool(),
            row,
            &gridiron_core::PositionMap::classic(),
            &flex(),
        );
        let mut key = row.clone();
        key.sort_unstable();
        keys.push(key);
    }
    let before = keys.len();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), before, "set contains duplicate lineups");

    // the wide slate has plenty of room, so the evolved set should
    // stay meaningfully diverse
    let metrics = outcome.diversity_metrics.as_ref().unwrap();
    assert!(
        metrics.avg_overlap <= 0.5,
        "intra-set overlap {} too high",
        metrics.avg_overlap
    );
}

#[test]
fn set_based_runs_are_reproducible() {
    let build = || {
        wide_optimizer()
            .seed(23)
            .population_size(16)
            .n_generations(6)
            .stop_criteria(6)
            .target_lineups(4)
            .lineup_pool_size(400)
            .build()
            .unwrap()
    };

    let first = build().run().unwrap();
    let second = build().run().unwrap();

    assert_eq!(first.lineups, second.lineups);
    assert_eq!(first.scores, second.scores);
}

#[test]
fn set_based_infeasible_when_pool_cannot_supply_enough_lineups() {
    // cap so tight almost nothing validates
    let optimizer = wide_optimizer()
        .seed(31)
        .salary_cap(100)
        .target_lineups(5)
        .lineup_pool_size(100)
        .build()
        .unwrap();

    assert!(optimizer.run().is_err());
}
