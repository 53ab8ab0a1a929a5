#![allow(dead_code)]

use gridiron_core::{PlayerId, PlayerPool, PlayerRow, Position, PositionMap};
use std::collections::HashSet;

/// A tiny deterministic slate: per position, salaries 1..=count with
/// points = 2 * salary. Every lineup fits the generous caps used in
/// tests, so the unique optimum is the top-salary pick in every slot.
pub fn toy_rows() -> Vec<PlayerRow> {
    let mut rows = Vec::new();
    for (position, count) in [("QB", 2), ("RB", 4), ("WR", 6), ("TE", 3), ("DST", 5)] {
        for i in 1..=count {
            rows.push(PlayerRow::new(
                format!("{position}{i}"),
                position,
                i as u32,
                (i * 2) as f32,
            ));
        }
    }
    rows
}

/// The toy slate's flat posmap (no FLEX).
pub fn toy_posmap() -> PositionMap {
    PositionMap::new()
        .with("QB", 1)
        .with("RB", 2)
        .with("WR", 3)
        .with("TE", 1)
        .with("DST", 1)
}

/// Optimal projected points for [toy_rows] + [toy_posmap]:
/// QB2 + (RB4, RB3) + (WR6, WR5, WR4) + TE3 + DST5.
pub const TOY_OPTIMUM: f32 = 64.0;

/// A larger slate with enough players that diverse multilineup
/// requests have room to breathe. Salaries and points vary so the
/// points-per-dollar prior actually biases sampling.
pub fn wide_rows() -> Vec<PlayerRow> {
    let mut rows = Vec::new();
    for (position, count, base_salary) in [
        ("QB", 10, 5_000),
        ("RB", 20, 4_000),
        ("WR", 30, 3_500),
        ("TE", 10, 2_500),
        ("DST", 10, 2_000),
    ] {
        for i in 0..count {
            let salary = base_salary + 173 * i as u32;
            // points loosely follow salary with a deterministic wobble
            let points = salary as f32 / 400.0 + ((i * 7) % 5) as f32;
            rows.push(PlayerRow::new(format!("{position}{i}"), position, salary, points));
        }
    }
    rows
}

/// Asserts the row is a structurally valid lineup for the given
/// layout-free checks: under cap and no repeated player.
pub fn assert_valid_lineup(pool: &PlayerPool, row: &[PlayerId], cap: u64) {
    assert!(
        pool.lineup_salary(row) <= cap,
        "lineup over cap: {} > {}",
        pool.lineup_salary(row),
        cap
    );

    let unique: HashSet<PlayerId> = row.iter().copied().collect();
    assert_eq!(unique.len(), row.len(), "lineup repeats a player: {row:?}");
}

/// Asserts slot-by-slot position integrity against a posmap layout.
pub fn assert_slot_integrity(
    pool: &PlayerPool,
    row: &[PlayerId],
    posmap: &PositionMap,
    flex: &[Position],
) {
    let layout = gridiron_core::SlotLayout::from_map(posmap);
    assert_eq!(row.len(), layout.len());

    for (c, &id) in row.iter().enumerate() {
        let slot = layout.position(c);
        let actual = pool.position(id);
        if slot.is_flex() {
            assert!(flex.contains(actual), "slot {c} holds non-flex {actual}");
        } else {
            assert_eq!(actual, slot, "slot {c} expected {slot}, got {actual}");
        }
    }
}
