mod common;

use common::*;
use gridiron_engines::{Mode, Optimizer, RunControl};
use gridiron_error::ErrorCode;
use std::time::Duration;

fn toy_optimizer() -> gridiron_engines::OptimizerBuilder {
    Optimizer::builder()
        .rows(toy_rows())
        .posmap(toy_posmap())
        .flex_positions([])
        .salary_cap(40)
        .population_size(512)
        .n_generations(50)
        .stop_criteria(50)
        .mutation_rate(0.1)
}

#[test]
fn toy_slate_converges_to_the_top_picks() {
    let optimizer = toy_optimizer().seed(42).build().unwrap();
    let outcome = optimizer.run().unwrap();

    // every lineup fits the cap, so the optimum is the top-salary pick
    // per slot; the engine should land on it or a near-neighbor
    assert!(
        outcome.best_score >= TOY_OPTIMUM - 2.0,
        "best {} too far from optimum {}",
        outcome.best_score,
        TOY_OPTIMUM
    );

    assert_valid_lineup(optimizer.pool(), &outcome.best_lineup, 40);
    assert_slot_integrity(optimizer.pool(), &outcome.best_lineup, &toy_posmap(), &[]);

    // the final population honors the invariants too
    for row in outcome.population.iter_rows() {
        assert_valid_lineup(optimizer.pool(), row, 40);
        assert_slot_integrity(optimizer.pool(), row, &toy_posmap(), &[]);
    }

    // no inter-lineup duplicates after validation
    let mut keys: Vec<Vec<u32>> = outcome
        .population
        .iter_rows()
        .map(|r| {
            let mut key = r.to_vec();
            key.sort_unstable();
            key
        })
        .collect();
    let before = keys.len();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), before, "duplicate lineups in final population");

    // population comes back sorted best-first
    for pair in outcome.fitness.windows(2) {
        assert!(pair[0] >= pair[1]);
    }
    assert_eq!(outcome.fitness[0], outcome.best_score);
}

#[test]
fn stop_on_stagnation_halts_the_loop_early() {
    let optimizer = toy_optimizer()
        .seed(42)
        .n_generations(100)
        .stop_criteria(2)
        .build()
        .unwrap();
    let outcome = optimizer.run().unwrap();

    if outcome.stagnated {
        assert!(
            outcome.generations_run <= outcome.best_solution_generation + 2,
            "ran {} generations past best at {}",
            outcome.generations_run,
            outcome.best_solution_generation
        );
    } else {
        // improvement every generation to the very end is the only
        // other legal way out
        assert_eq!(outcome.generations_run, 100);
    }
}

#[test]
fn identical_seeds_reproduce_bit_identical_results() {
    let first = toy_optimizer().seed(7).build().unwrap().run().unwrap();
    let second = toy_optimizer().seed(7).build().unwrap().run().unwrap();

    assert_eq!(first.best_lineup, second.best_lineup);
    assert_eq!(first.best_score, second.best_score);
    assert_eq!(first.fitness, second.fitness);
    assert_eq!(first.population, second.population);
}

#[test]
fn different_seeds_usually_differ() {
    let first = toy_optimizer().seed(1).build().unwrap().run().unwrap();
    let second = toy_optimizer().seed(2).build().unwrap().run().unwrap();

    // scores may coincide at the optimum, but whole populations
    // matching would mean the seed is ignored
    assert_ne!(first.population, second.population);
}

#[test]
fn cancellation_returns_best_so_far_flagged_aborted() {
    let optimizer = toy_optimizer()
        .seed(3)
        .n_generations(10_000_000)
        .stop_criteria(10_000_000)
        .control(RunControl::with_timeout(Duration::from_millis(50)))
        .build()
        .unwrap();

    let outcome = optimizer.run().unwrap();

    assert!(outcome.aborted);
    assert!(outcome.best_score > 0.0);
    assert_valid_lineup(optimizer.pool(), &outcome.best_lineup, 40);
}

#[test]
fn pre_stopped_control_still_yields_the_seeded_best() {
    let control = RunControl::new();
    control.stop();

    let optimizer = toy_optimizer().seed(3).control(control).build().unwrap();
    let outcome = optimizer.run().unwrap();

    assert!(outcome.aborted);
    assert!(!outcome.best_lineup.is_empty());
}

#[test]
fn infeasible_cap_is_an_error() {
    let result = toy_optimizer().salary_cap(2).seed(5).build().unwrap().run();

    match result {
        Err(err) => assert_eq!(err.code(), ErrorCode::Infeasible),
        Ok(_) => panic!("expected an infeasibility error"),
    }
}

#[test]
fn flex_slots_without_flex_positions_fail_config_validation() {
    let posmap = toy_posmap().with(gridiron_core::Position::flex(), 1);
    let result = Optimizer::builder()
        .rows(toy_rows())
        .posmap(posmap)
        .flex_positions([])
        .build();

    match result {
        Err(err) => assert_eq!(err.code(), ErrorCode::InvalidConfig),
        Ok(_) => panic!("expected a config error"),
    }
}

#[test]
fn single_target_ignores_set_mode() {
    let optimizer = toy_optimizer()
        .seed(11)
        .target_lineups(1)
        .mode(Mode::SetBased)
        .build()
        .unwrap();
    let outcome = optimizer.run().unwrap();

    assert!(outcome.lineups.is_none());
    assert!(outcome.scores.is_none());
    assert!(outcome.best_score > 0.0);
}

#[test]
fn elite_count_is_clamped_when_population_is_tiny() {
    // population below the elite divisor still runs
    let optimizer = toy_optimizer()
        .seed(13)
        .population_size(3)
        .elite_divisor(10)
        .n_generations(5)
        .stop_criteria(5)
        .build()
        .unwrap();

    let outcome = optimizer.run().unwrap();
    assert!(outcome.best_score > 0.0);
}
