use crate::builder::OptimizerBuilder;
use crate::config::{Mode, OptimizerConfig};
use crate::control::RunControl;
use crate::outcome::{DiversityMetrics, OptimizeOutcome, ProfilingReport};
use crate::post_select::DiversePostSelector;
use crate::sets::SetEngine;
use crate::single::SingleLineupEngine;
use gridiron_core::{
    PlayerPool, PositionPool, SlotLayout, SlotViews, Timer, ValidationContext, max_pairwise,
    mean_pairwise, min_pairwise, pairwise_matrix, random_provider,
};
use gridiron_error::GridironResult;
use tracing::info;

/// The assembled optimizer: an immutable player pool, a validated
/// configuration, and a cancellation handle. `run` dispatches on the
/// configuration — single lineup, single + diverse post-selection, or
/// the set-based engine — and always returns a structured outcome.
/// Multiple optimizers can share a process; the only global state is
/// the seedable RNG provider.
pub struct Optimizer {
    pool: PlayerPool,
    config: OptimizerConfig,
    control: RunControl,
}

impl Optimizer {
    pub fn builder() -> OptimizerBuilder {
        OptimizerBuilder::new()
    }

    pub(crate) fn assembled(pool: PlayerPool, config: OptimizerConfig, control: RunControl) -> Self {
        Optimizer {
            pool,
            config,
            control,
        }
    }

    pub fn pool(&self) -> &PlayerPool {
        &self.pool
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// A handle for cancelling this optimizer's runs from another
    /// thread.
    pub fn control(&self) -> RunControl {
        self.control.clone()
    }

    pub fn run(&self) -> GridironResult<OptimizeOutcome> {
        if let Some(seed) = self.config.seed {
            random_provider::set_seed(seed);
        }

        let total = Timer::new();

        let layout = SlotLayout::from_map(&self.config.posmap);
        let position_pool = PositionPool::new(
            &self.pool,
            &self.config.posfilter,
            &self.config.flex_positions,
        )?;
        let slots = SlotViews::resolve(&position_pool, &layout)?;
        let ctx = ValidationContext {
            pool: &self.pool,
            layout: &layout,
            flex_positions: &self.config.flex_positions,
            salary_cap: self.config.salary_cap,
        };

        let use_sets = self.config.target_lineups > 1 && self.config.mode == Mode::SetBased;
        if use_sets {
            self.run_set_based(&slots, &ctx, total)
        } else {
            self.run_population(&slots, &ctx, total)
        }
    }

    /// Single-lineup loop, with the diverse post-selector appended for
    /// multilineup requests in post-processing mode.
    fn run_population(
        &self,
        slots: &SlotViews<'_>,
        ctx: &ValidationContext<'_>,
        total: Timer,
    ) -> GridironResult<OptimizeOutcome> {
        let engine = SingleLineupEngine::new(&self.pool, slots, ctx, &self.config, &self.control);
        let mut run = engine.run()?;

        let mut outcome = OptimizeOutcome::single(
            run.best_lineup,
            run.best_score,
            run.population,
            run.fitness,
        );
        outcome.stagnated = run.stagnated;
        outcome.aborted = run.aborted;
        outcome.generations_run = run.generations_run;
        outcome.best_solution_generation = run.best_generation;

        if self.config.target_lineups > 1 {
            let selector = DiversePostSelector::new(&self.config);
            let timer = Timer::new();
            let picked = selector.select(&outcome.population, &outcome.fitness);
            run.profiler.record(
                gridiron_core::metric_names::DIVERSE_SELECT,
                picked.lineups.len() as f32,
                timer.elapsed(),
            );

            outcome.diversity_relaxed = picked.relaxed;
            outcome.diversity_shortfall = picked.shortfall;
            outcome.lineups = Some(picked.lineups);
            outcome.scores = Some(picked.scores);
            outcome.diversity_metrics = Some(picked.metrics);
        }

        if self.config.enable_profiling {
            outcome.profiling = Some(
                ProfilingReport {
                    total_time: total.elapsed(),
                    setup_time: run.setup_time,
                    loop_time: run.loop_time,
                    time_to_best_solution: run.time_to_best,
                    best_solution_generation: run.best_generation,
                    operations: Default::default(),
                }
                .with_operations(run.profiler.metrics()),
            );
        }

        info!(
            best = outcome.best_score,
            generations = outcome.generations_run,
            aborted = outcome.aborted,
            "optimization finished"
        );

        Ok(outcome)
    }

    fn run_set_based(
        &self,
        slots: &SlotViews<'_>,
        ctx: &ValidationContext<'_>,
        total: Timer,
    ) -> GridironResult<OptimizeOutcome> {
        let engine = SetEngine::new(&self.pool, slots, ctx, &self.config, &self.control);
        let run = engine.run()?;

        let diversity = crate::registry::diversity(self.config.diversity_method);
        let matrix = pairwise_matrix(&run.best_set, diversity.as_ref());
        let metrics = DiversityMetrics {
            avg_overlap: mean_pairwise(&matrix),
            min_overlap: min_pairwise(&matrix),
            max_overlap: max_pairwise(&matrix),
            pairwise_matrix: matrix,
        };

        let mut outcome = OptimizeOutcome::single(
            run.best_set.row(0).to_vec(),
            run.lineup_scores[0],
            run.best_set.clone(),
            run.lineup_scores.clone(),
        );
        outcome.lineups = Some(run.best_set.iter_rows().map(|r| r.to_vec()).collect());
        outcome.scores = Some(run.lineup_scores.clone());
        outcome.diversity_metrics = Some(metrics);
        outcome.stagnated = run.stagnated;
        outcome.aborted = run.aborted;
        outcome.generations_run = run.generations_run;
        outcome.best_solution_generation = run.best_generation;

        if self.config.enable_profiling {
            outcome.profiling = Some(
                ProfilingReport {
                    total_time: total.elapsed(),
                    setup_time: run.setup_time,
                    loop_time: run.loop_time,
                    time_to_best_solution: run.time_to_best,
                    best_solution_generation: run.best_generation,
                    operations: Default::default(),
                }
                .with_operations(run.profiler.metrics()),
            );
        }

        info!(
            best = outcome.best_score,
            lineups = self.config.target_lineups,
            generations = outcome.generations_run,
            aborted = outcome.aborted,
            "set-based optimization finished"
        );

        Ok(outcome)
    }
}
