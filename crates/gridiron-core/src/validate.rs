use crate::matrix::LineupMatrix;
use crate::pool::{PlayerId, PlayerPool};
use crate::position::Position;
use crate::slots::SlotLayout;
use hashbrown::HashSet;

/// Everything a validator may consult. Pools and layout are immutable
/// for the run; validators are stateless filters over them.
pub struct ValidationContext<'a> {
    pub pool: &'a PlayerPool,
    pub layout: &'a SlotLayout,
    pub flex_positions: &'a [Position],
    pub salary_cap: u64,
}

/// A row filter over a population. Validators flag rows to drop; they
/// never repair a lineup. The engine composes them in a fixed order
/// and tops the population back up afterwards.
pub trait Validate: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
            .split("<")
            .next()
            .unwrap_or(std::any::type_name::<Self>())
            .split("::")
            .last()
            .unwrap_or("Unknown Validator")
    }

    /// Clears `keep[r]` for every row `r` that violates this
    /// validator's constraint. Rows already cleared may be skipped.
    fn flag(&self, population: &LineupMatrix, ctx: &ValidationContext<'_>, keep: &mut [bool]);
}

/// Keeps rows whose total salary is within the cap.
#[derive(Debug, Default)]
pub struct SalaryCap;

impl Validate for SalaryCap {
    fn flag(&self, population: &LineupMatrix, ctx: &ValidationContext<'_>, keep: &mut [bool]) {
        for (r, row) in population.iter_rows().enumerate() {
            if keep[r] && ctx.pool.lineup_salary(row) > ctx.salary_cap {
                keep[r] = false;
            }
        }
    }
}

/// Drops rows where any player id appears more than once, including a
/// base slot and a FLEX slot holding the same player.
#[derive(Debug, Default)]
pub struct NoDuplicatePlayers;

impl Validate for NoDuplicatePlayers {
    fn flag(&self, population: &LineupMatrix, ctx: &ValidationContext<'_>, keep: &mut [bool]) {
        let mut scratch: Vec<PlayerId> = Vec::with_capacity(ctx.layout.len());
        for (r, row) in population.iter_rows().enumerate() {
            if !keep[r] {
                continue;
            }

            scratch.clear();
            scratch.extend_from_slice(row);
            scratch.sort_unstable();
            if scratch.windows(2).any(|pair| pair[0] == pair[1]) {
                keep[r] = false;
            }
        }
    }
}

/// Checks every slot against the canonical layout: non-FLEX slots must
/// hold an id of the slot's position, FLEX slots an id whose position
/// is FLEX-eligible. Populate and the slot mutator preserve this by
/// construction, so in the steady state this only catches operator
/// bugs and FLEX-ineligible drifts.
#[derive(Debug, Default)]
pub struct PositionStructure;

impl Validate for PositionStructure {
    fn flag(&self, population: &LineupMatrix, ctx: &ValidationContext<'_>, keep: &mut [bool]) {
        for (r, row) in population.iter_rows().enumerate() {
            if !keep[r] {
                continue;
            }

            for (c, &id) in row.iter().enumerate() {
                let slot = ctx.layout.position(c);
                let actual = ctx.pool.position(id);
                let ok = if slot.is_flex() {
                    ctx.flex_positions.contains(actual)
                } else {
                    actual == slot
                };

                if !ok {
                    keep[r] = false;
                    break;
                }
            }
        }
    }
}

/// Drops later rows whose sorted id vector duplicates an earlier kept
/// row, so the surviving population holds pairwise-distinct lineups.
#[derive(Debug, Default)]
pub struct DistinctLineups;

impl Validate for DistinctLineups {
    fn flag(&self, population: &LineupMatrix, _ctx: &ValidationContext<'_>, keep: &mut [bool]) {
        let mut seen: HashSet<Vec<PlayerId>> = HashSet::with_capacity(population.rows());
        for r in 0..population.rows() {
            if keep[r] && !seen.insert(population.sorted_row_key(r)) {
                keep[r] = false;
            }
        }
    }
}

/// The canonical pipeline, in its fixed order: salary cap, duplicate
/// players, position structure, cross-population duplicates.
pub fn standard_validators() -> Vec<Box<dyn Validate>> {
    vec![
        Box::new(SalaryCap),
        Box::new(NoDuplicatePlayers),
        Box::new(PositionStructure),
        Box::new(DistinctLineups),
    ]
}

/// Applies the validators in order and compacts the population to the
/// surviving rows. Applying the result to the same pipeline again is a
/// no-op.
pub fn run_validators(
    validators: &[Box<dyn Validate>],
    mut population: LineupMatrix,
    ctx: &ValidationContext<'_>,
) -> LineupMatrix {
    for validator in validators {
        if population.is_empty() {
            break;
        }

        let mut keep = vec![true; population.rows()];
        validator.flag(&population, ctx, &mut keep);
        if keep.iter().any(|&k| !k) {
            population.retain_rows(&keep);
        }
    }

    population
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::PlayerRow;
    use crate::slots::PositionMap;

    fn fixture() -> (PlayerPool, SlotLayout, Vec<Position>) {
        let allowed = vec![
            Position::new("QB"),
            Position::new("RB"),
            Position::new("WR"),
        ];
        let pool = PlayerPool::from_rows(
            vec![
                PlayerRow::new("q1", "QB", 100, 10.0), // id 0
                PlayerRow::new("q2", "QB", 300, 20.0), // id 1
                PlayerRow::new("r1", "RB", 100, 8.0),  // id 2
                PlayerRow::new("r2", "RB", 200, 12.0), // id 3
                PlayerRow::new("w1", "WR", 100, 9.0),  // id 4
            ],
            &allowed,
        )
        .unwrap();

        let map = PositionMap::new()
            .with("QB", 1)
            .with("RB", 1)
            .with(Position::flex(), 1);
        let layout = SlotLayout::from_map(&map);
        let flex = vec![Position::new("RB"), Position::new("WR")];

        (pool, layout, flex)
    }

    fn ctx<'a>(
        pool: &'a PlayerPool,
        layout: &'a SlotLayout,
        flex: &'a [Position],
        cap: u64,
    ) -> ValidationContext<'a> {
        ValidationContext {
            pool,
            layout,
            flex_positions: flex,
            salary_cap: cap,
        }
    }

    #[test]
    fn salary_cap_filters_expensive_rows() {
        let (pool, layout, flex) = fixture();
        // [q1, r1, w1] = 300; [q2, r2, w1] = 600
        let population = LineupMatrix::from_vec(vec![0, 2, 4, 1, 3, 4], 3);

        let kept = run_validators(
            &[Box::new(SalaryCap) as Box<dyn Validate>],
            population,
            &ctx(&pool, &layout, &flex, 400),
        );

        assert_eq!(kept.rows(), 1);
        assert_eq!(&kept[0], &[0, 2, 4]);
    }

    #[test]
    fn duplicate_players_filtered_across_flex() {
        let (pool, layout, flex) = fixture();
        // second row repeats r1 in the FLEX slot
        let population = LineupMatrix::from_vec(vec![0, 2, 4, 0, 2, 2], 3);

        let kept = run_validators(
            &[Box::new(NoDuplicatePlayers) as Box<dyn Validate>],
            population,
            &ctx(&pool, &layout, &flex, u64::MAX),
        );

        assert_eq!(kept.rows(), 1);
    }

    #[test]
    fn position_structure_checks_flex_eligibility() {
        let (pool, layout, flex) = fixture();
        // row 0 has QB in the FLEX slot (ineligible), row 1 is fine
        let population = LineupMatrix::from_vec(vec![0, 2, 1, 0, 2, 4], 3);

        let kept = run_validators(
            &[Box::new(PositionStructure) as Box<dyn Validate>],
            population,
            &ctx(&pool, &layout, &flex, u64::MAX),
        );

        assert_eq!(kept.rows(), 1);
        assert_eq!(&kept[0], &[0, 2, 4]);
    }

    #[test]
    fn distinct_lineups_uses_sorted_keys() {
        let (pool, layout, flex) = fixture();
        // rows 0 and 1 are the same players with swapped RB/FLEX slots
        let population = LineupMatrix::from_vec(vec![0, 2, 3, 0, 3, 2, 1, 2, 4], 3);

        let kept = run_validators(
            &[Box::new(DistinctLineups) as Box<dyn Validate>],
            population,
            &ctx(&pool, &layout, &flex, u64::MAX),
        );

        assert_eq!(kept.rows(), 2);
        assert_eq!(&kept[0], &[0, 2, 3]);
    }

    #[test]
    fn full_pipeline_is_idempotent() {
        let (pool, layout, flex) = fixture();
        let population = LineupMatrix::from_vec(
            vec![
                0, 2, 4, // valid
                0, 2, 2, // duplicate player
                1, 3, 4, // over a 500 cap
                0, 3, 2, // valid
                0, 2, 4, // duplicate lineup of row 0
            ],
            3,
        );

        let validators = standard_validators();
        let context = ctx(&pool, &layout, &flex, 500);

        let once = run_validators(&validators, population, &context);
        let twice = run_validators(&validators, once.clone(), &context);

        assert_eq!(once.rows(), 2);
        assert_eq!(once, twice);
    }
}
