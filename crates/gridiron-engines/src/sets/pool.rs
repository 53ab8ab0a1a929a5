use crate::single::sort_by_fitness;
use gridiron_core::{
    Fitness, LineupMatrix, PlayerId, PlayerPool, SlotViews, Validate, ValidationContext,
    populate, random_provider, run_validators,
};
use gridiron_error::{GridironResult, gridiron_bail};
use hashbrown::HashSet;
use tracing::{debug, warn};

/// Share of the pool treated as its elite portion for injection and
/// refresh purposes.
const ELITE_FRACTION: f32 = 0.2;

/// A large reservoir of validated lineups backing set-based mode:
/// sets are seeded from it, mutation injects from it, and (optionally)
/// its elite portion is refreshed with the best lineups the evolving
/// sets discover. Rows are kept sorted by fitness descending.
pub struct LineupPool {
    matrix: LineupMatrix,
    fitness: Vec<f32>,
}

impl LineupPool {
    /// Samples, validates, and deduplicates lineups until `size` rows
    /// exist or the retry budget is spent. Returns however many rows
    /// were achievable (warning on shortfall); zero rows is an
    /// infeasibility error.
    pub fn build(
        slots: &SlotViews<'_>,
        validators: &[Box<dyn Validate>],
        ctx: &ValidationContext<'_>,
        fitness_fn: &dyn Fitness,
        pool: &PlayerPool,
        size: usize,
        retries: usize,
    ) -> GridironResult<Self> {
        let mut matrix = populate(slots, size);
        matrix = run_validators(validators, matrix, ctx);

        let mut attempts = 0;
        while matrix.rows() < size && attempts < retries {
            let missing = size - matrix.rows();
            let extra = populate(slots, missing * 2);
            matrix.extend_from(&extra);
            matrix = run_validators(validators, matrix, ctx);
            attempts += 1;
        }

        if matrix.is_empty() {
            gridiron_bail!(Infeasible: "no valid lineup could be sampled for the lineup pool");
        }

        if matrix.rows() < size {
            warn!(rows = matrix.rows(), wanted = size, "lineup pool under-filled");
        }

        matrix.truncate_rows(size.min(matrix.rows()));
        let mut fitness = fitness_fn.score(&matrix, pool);
        sort_by_fitness(&mut matrix, &mut fitness);

        debug!(rows = matrix.rows(), "lineup pool built");
        Ok(LineupPool { matrix, fitness })
    }

    pub fn len(&self) -> usize {
        self.matrix.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    pub fn lineup_len(&self) -> usize {
        self.matrix.cols()
    }

    pub fn matrix(&self) -> &LineupMatrix {
        &self.matrix
    }

    pub fn row(&self, index: usize) -> &[PlayerId] {
        self.matrix.row(index)
    }

    pub fn fitness(&self, index: usize) -> f32 {
        self.fitness[index]
    }

    /// A uniform draw over the whole pool.
    pub fn sample_row(&self) -> &[PlayerId] {
        self.row(random_provider::range(0..self.len()))
    }

    /// A uniform draw over the elite (top-fitness) portion.
    pub fn sample_elite_row(&self) -> &[PlayerId] {
        let elite = ((self.len() as f32 * ELITE_FRACTION).ceil() as usize)
            .clamp(1, self.len());
        self.row(random_provider::range(0..elite))
    }

    /// Starting from a random cursor, yields the first pool row whose
    /// sorted key is not already present in `taken`. Returns None only
    /// when every pool row is taken.
    pub fn first_untaken(&self, taken: &HashSet<Vec<PlayerId>>) -> Option<&[PlayerId]> {
        let len = self.len();
        let start = random_provider::range(0..len);
        for offset in 0..len {
            let row = self.row((start + offset) % len);
            let mut key = row.to_vec();
            key.sort_unstable();
            if !taken.contains(&key) {
                return Some(row);
            }
        }
        None
    }

    /// Pool evolution: replaces the tail of the elite portion with the
    /// given candidate lineups (already observed to be valid), skipping
    /// candidates the pool already holds, then restores fitness order.
    pub fn refresh(&mut self, candidates: &LineupMatrix, candidate_fitness: &[f32]) {
        if candidates.is_empty() {
            return;
        }

        let elite = ((self.len() as f32 * ELITE_FRACTION).ceil() as usize).clamp(1, self.len());
        let replaceable = (elite / 2).max(1);

        let mut existing: HashSet<Vec<PlayerId>> = self
            .matrix
            .iter_rows()
            .map(|row| {
                let mut key = row.to_vec();
                key.sort_unstable();
                key
            })
            .collect();

        // candidates arrive best-first; overwrite the worst rows of
        // the elite band with new material
        let mut write = elite.saturating_sub(1);
        let mut replaced = 0;
        for (r, row) in candidates.iter_rows().enumerate() {
            if replaced == replaceable {
                break;
            }

            let mut key = row.to_vec();
            key.sort_unstable();
            if !existing.insert(key) {
                continue;
            }

            self.matrix.row_mut(write).copy_from_slice(row);
            self.fitness[write] = candidate_fitness[r];
            write = write.saturating_sub(1);
            replaced += 1;
        }

        if replaced > 0 {
            sort_by_fitness(&mut self.matrix, &mut self.fitness);
            debug!(replaced, "lineup pool refreshed from evolved sets");
        }
    }
}
