use super::pool::LineupPool;
use crate::config::OptimizerConfig;
use gridiron_core::{
    Diversity, Fitness, LineupMatrix, PlayerId, PlayerPool, SlotViews, ValidationContext,
    mean_pairwise, pairwise_matrix, random_provider,
};
use hashbrown::HashSet;

/// Set-level fitness: the total projected points across the set's
/// lineups, minus `weight` times the mean pairwise similarity inside
/// the set. A zero weight skips the O(n^2) similarity pass entirely.
pub fn set_score(
    set: &LineupMatrix,
    pool: &PlayerPool,
    fitness: &dyn Fitness,
    weight: f32,
    diversity: &dyn Diversity,
) -> f32 {
    let points: f32 = set.iter_rows().map(|row| fitness.score_row(row, pool)).sum();

    if weight == 0.0 {
        return points;
    }

    let penalty = mean_pairwise(&pairwise_matrix(set, diversity));
    points - weight * penalty
}

/// Per-row validity: salary cap, no duplicate players, slot structure.
/// The set engine repairs rather than filters, so this is a predicate,
/// not a population pass.
pub fn row_is_valid(row: &[PlayerId], ctx: &ValidationContext<'_>) -> bool {
    if ctx.pool.lineup_salary(row) > ctx.salary_cap {
        return false;
    }

    let mut sorted = row.to_vec();
    sorted.sort_unstable();
    if sorted.windows(2).any(|pair| pair[0] == pair[1]) {
        return false;
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
            return false;
        }
    }

    true
}

/// Set-level crossover: tournament-pick from the two parents' combined
/// lineups by per-lineup fitness, then fill. Duplicate picks are
/// resolved afterwards by [repair_set].
pub fn set_crossover(
    a: &LineupMatrix,
    b: &LineupMatrix,
    pool: &PlayerPool,
    fitness: &dyn Fitness,
) -> LineupMatrix {
    let n = a.rows();
    let combined_rows = a.rows() + b.rows();
    let mut combined = LineupMatrix::with_capacity(combined_rows, a.cols());
    combined.extend_from(a);
    combined.extend_from(b);

    let row_fitness: Vec<f32> = combined
        .iter_rows()
        .map(|row| fitness.score_row(row, pool))
        .collect();

    let mut child = LineupMatrix::with_capacity(n, a.cols());
    for _ in 0..n {
        // tournament of two over the combined parents
        let one = random_provider::range(0..combined_rows);
        let two = random_provider::range(0..combined_rows);
        let winner = if row_fitness[one] >= row_fitness[two] { one } else { two };
        child.push_row(combined.row(winner));
    }

    child
}

/// Set-level mutation: each lineup mutates with `mutation_rate`
/// probability, either by swapping a single slot through the position
/// views or by being replaced wholesale with an elite draw from the
/// lineup pool. The intensity setting (escalating when adaptive)
/// decides the mix. Returns the number of mutated lineups.
pub fn set_mutate(
    set: &mut LineupMatrix,
    config: &OptimizerConfig,
    slots: &SlotViews<'_>,
    pool: &LineupPool,
    unimproved_generations: usize,
) -> usize {
    let inject_prob = config
        .mutation_intensity
        .injection_probability(unimproved_generations);

    let cols = set.cols();
    let mut mutated = 0;
    for r in 0..set.rows() {
        if !random_provider::bool(config.mutation_rate) {
            continue;
        }

        mutated += 1;
        if random_provider::bool(inject_prob) {
            let replacement = pool.sample_elite_row().to_vec();
            set.row_mut(r).copy_from_slice(&replacement);
        } else {
            let c = random_provider::range(0..cols);
            set.row_mut(r)[c] = slots.view(c).sample();
        }
    }

    mutated
}

/// Re-establishes the set invariants after crossover/mutation: every
/// lineup individually valid and all lineups pairwise distinct.
/// Offending rows are replaced with unused pool lineups (the pool is
/// validated and deduplicated, so replacements are always clean).
pub fn repair_set(set: &mut LineupMatrix, ctx: &ValidationContext<'_>, pool: &LineupPool) {
    let mut taken: HashSet<Vec<PlayerId>> = HashSet::with_capacity(set.rows());

    for r in 0..set.rows() {
        let mut key = set.row(r).to_vec();
        key.sort_unstable();

        let needs_replacement = !row_is_valid(set.row(r), ctx) || taken.contains(&key);
        if needs_replacement {
            if let Some(replacement) = pool.first_untaken(&taken) {
                let replacement = replacement.to_vec();
                set.row_mut(r).copy_from_slice(&replacement);
                key = replacement;
                key.sort_unstable();
            }
        }

        taken.insert(key);
    }
}
