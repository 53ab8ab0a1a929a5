use super::ops::{repair_set, set_crossover, set_mutate, set_score};
use super::pool::LineupPool;
use super::sampler::{fingerprint_sets, greedy_sets};
use crate::config::OptimizerConfig;
use crate::control::RunControl;
use crate::registry;
use gridiron_core::{
    Diversity, Fitness, LineupMatrix, PlayerPool, Profiler, Select, SlotViews, Timer, Validate,
    ValidationContext, metric_names, run_validators, standard_validators,
};
use gridiron_error::{GridironResult, gridiron_bail};
use gridiron_selectors::TournamentSelector;
use std::time::Duration;
use tracing::{debug, info};

/// Above this `pool_size * target_lineups` product, pairwise-greedy
/// seeding is too expensive and fingerprint clustering is always used.
const PAIRWISE_SEEDING_LIMIT: usize = 1_000;

/// A finished set-based run. `best_set` rows are sorted by per-lineup
/// score descending.
pub struct SetRunOutput {
    pub best_set: LineupMatrix,
    pub lineup_scores: Vec<f32>,
    pub best_set_score: f32,
    pub best_generation: usize,
    pub time_to_best: Duration,
    pub generations_run: usize,
    pub stagnated: bool,
    pub aborted: bool,
    pub setup_time: Duration,
    pub loop_time: Duration,
    pub profiler: Profiler,
}

/// The set-based engine: evolves `population_size` candidate *sets* of
/// `target_lineups` lineups each, under a set-level fitness that
/// rewards aggregate projected points and penalizes intra-set overlap.
/// Sets are seeded from a large validated lineup pool via fingerprint
/// clustering, recombined by per-lineup tournament, mutated by slot
/// swap or pool injection, and repaired back to validity after every
/// operator.
pub struct SetEngine<'a> {
    pool: &'a PlayerPool,
    slots: &'a SlotViews<'a>,
    ctx: &'a ValidationContext<'a>,
    config: &'a OptimizerConfig,
    control: &'a RunControl,
    validators: Vec<Box<dyn Validate>>,
    fitness: Box<dyn Fitness>,
    diversity: Box<dyn Diversity>,
}

impl<'a> SetEngine<'a> {
    pub fn new(
        pool: &'a PlayerPool,
        slots: &'a SlotViews<'a>,
        ctx: &'a ValidationContext<'a>,
        config: &'a OptimizerConfig,
        control: &'a RunControl,
    ) -> Self {
        let diversity: Box<dyn Diversity> = registry::diversity(config.diversity_method);

        SetEngine {
            pool,
            slots,
            ctx,
            config,
            control,
            validators: standard_validators(),
            fitness: registry::fitness(config),
            diversity,
        }
    }

    pub fn run(&self) -> GridironResult<SetRunOutput> {
        let total = Timer::new();
        let mut profiler = Profiler::new(self.config.enable_profiling);

        let k = self.config.population_size;
        let n = self.config.target_lineups;

        // ---- setup: lineup pool + seed sets ----
        let setup = Timer::new();
        let pool_timer = Timer::new();
        let mut lineup_pool = LineupPool::build(
            self.slots,
            &self.validators,
            self.ctx,
            self.fitness.as_ref(),
            self.pool,
            self.config.lineup_pool_size,
            self.config.top_up_retries,
        )?;
        profiler.record(
            metric_names::POOL_BUILD,
            lineup_pool.len() as f32,
            pool_timer.elapsed(),
        );

        if lineup_pool.len() < n {
            gridiron_bail!(
                Infeasible: "only {} distinct valid lineups exist, need {}",
                lineup_pool.len(),
                n
            );
        }

        let mut sets = if lineup_pool.len() * n > PAIRWISE_SEEDING_LIMIT {
            fingerprint_sets(&lineup_pool, k, n)
        } else {
            greedy_sets(&lineup_pool, k, n, self.diversity.as_ref())
        };
        for set in sets.iter_mut() {
            repair_set(set, self.ctx, &lineup_pool);
        }

        let mut set_fitness = self.score_sets(&sets, &mut profiler);
        sort_sets(&mut sets, &mut set_fitness);
        let setup_time = setup.elapsed();

        let mut best_set = sets[0].clone();
        let mut best_score = set_fitness[0];
        let mut best_generation = 0;
        let mut time_to_best = total.elapsed();
        let mut unimproved = 0usize;
        let mut generations_run = 0usize;
        let mut stagnated = false;
        let mut aborted = false;

        info!(
            sets = sets.len(),
            pool = lineup_pool.len(),
            best = best_score,
            "set-based optimization started"
        );

        let parent_selector = TournamentSelector::new(self.config.tournament_size);

        // ---- generational loop over sets ----
        let loop_timer = Timer::new();
        for generation in 1..=self.config.n_generations {
            if self.control.is_stopped() {
                aborted = true;
                break;
            }

            if unimproved >= self.config.stop_criteria {
                stagnated = true;
                info!(generation, best = best_score, "stopping on stagnation");
                break;
            }

            let gen_timer = Timer::new();
            let elite_count = self.config.elite_count(sets.len());

            let mut next: Vec<LineupMatrix> = sets[..elite_count].to_vec();
            let crossover_timer = Timer::new();
            while next.len() < k {
                let parents = parent_selector.select(&set_fitness, 2);
                let child = set_crossover(
                    &sets[parents[0]],
                    &sets[parents[1]],
                    self.pool,
                    self.fitness.as_ref(),
                );
                next.push(child);
            }
            profiler.record(
                metric_names::SET_CROSSOVER,
                (next.len() - elite_count) as f32,
                crossover_timer.elapsed(),
            );

            let mutate_timer = Timer::new();
            let mut mutated = 0;
            for set in next.iter_mut().skip(elite_count) {
                mutated += set_mutate(set, self.config, self.slots, &lineup_pool, unimproved);
                repair_set(set, self.ctx, &lineup_pool);
            }
            profiler.record(metric_names::SET_MUTATE, mutated as f32, mutate_timer.elapsed());

            if self.control.is_stopped() {
                aborted = true;
                break;
            }

            let mut next_fitness = self.score_sets(&next, &mut profiler);
            sort_sets(&mut next, &mut next_fitness);
            next.truncate(k);
            next_fitness.truncate(k);

            sets = next;
            set_fitness = next_fitness;

            if set_fitness[0] > best_score {
                best_score = set_fitness[0];
                best_set = sets[0].clone();
                best_generation = generation;
                time_to_best = total.elapsed();
                unimproved = 0;
            } else {
                unimproved += 1;
            }

            if let Some(interval) = self.config.pool_refresh_interval {
                if interval > 0 && generation % interval == 0 {
                    self.refresh_pool(&mut lineup_pool, &sets, &mut profiler);
                }
            }

            generations_run = generation;
            profiler.record(metric_names::GENERATION, 1.0, gen_timer.elapsed());
            profiler.record_value(metric_names::SCORES, set_fitness[0]);

            debug!(generation, best = best_score, unimproved, "set generation complete");

            if self.control.is_stopped() {
                aborted = true;
                break;
            }
        }

        let loop_time = loop_timer.elapsed();

        // best set's lineups, best first
        let mut lineup_scores: Vec<f32> = best_set
            .iter_rows()
            .map(|row| self.fitness.score_row(row, self.pool))
            .collect();
        crate::single::sort_by_fitness(&mut best_set, &mut lineup_scores);

        Ok(SetRunOutput {
            best_set,
            lineup_scores,
            best_set_score: best_score,
            best_generation,
            time_to_best,
            generations_run,
            stagnated,
            aborted,
            setup_time,
            loop_time,
            profiler,
        })
    }

    fn score_sets(&self, sets: &[LineupMatrix], profiler: &mut Profiler) -> Vec<f32> {
        let timer = Timer::new();
        let scores = sets
            .iter()
            .map(|set| {
                set_score(
                    set,
                    self.pool,
                    self.fitness.as_ref(),
                    self.config.diversity_weight,
                    self.diversity.as_ref(),
                )
            })
            .collect::<Vec<f32>>();
        profiler.record(metric_names::SET_FITNESS, scores.len() as f32, timer.elapsed());
        scores
    }

    /// Pool evolution: gathers the lineups of the current top sets,
    /// validates/dedupes them through the standard pipeline, and folds
    /// the best of them into the lineup pool's elite band.
    fn refresh_pool(&self, lineup_pool: &mut LineupPool, sets: &[LineupMatrix], profiler: &mut Profiler) {
        let timer = Timer::new();

        let donor_sets = sets.len().min(4);
        let mut candidates = LineupMatrix::new(lineup_pool.lineup_len());
        for set in &sets[..donor_sets] {
            candidates.extend_from(set);
        }

        let mut candidates = run_validators(&self.validators, candidates, self.ctx);
        let mut candidate_fitness = self.fitness.score(&candidates, self.pool);
        crate::single::sort_by_fitness(&mut candidates, &mut candidate_fitness);

        lineup_pool.refresh(&candidates, &candidate_fitness);
        profiler.record(
            metric_names::POOL_REFRESH,
            candidates.rows() as f32,
            timer.elapsed(),
        );
    }
}

/// Sorts the set population and its fitness together, best first,
/// stable for determinism.
fn sort_sets(sets: &mut Vec<LineupMatrix>, fitness: &mut Vec<f32>) {
    let mut order = (0..fitness.len()).collect::<Vec<usize>>();
    order.sort_by(|&a, &b| {
        fitness[b]
            .partial_cmp(&fitness[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    *sets = order.iter().map(|&i| sets[i].clone()).collect();
    *fitness = order.iter().map(|&i| fitness[i]).collect();
}
