use crate::config::OptimizerConfig;
use crate::control::RunControl;
use crate::registry;
use gridiron_core::{
    Crossover, Fitness, LineupMatrix, Mutate, PlayerId, PlayerPool, Profiler, Select, SlotViews,
    Timer, Validate, ValidationContext, metric_names, populate, run_validators,
    standard_validators,
};
use gridiron_error::{GridironResult, gridiron_bail};
use std::time::Duration;
use tracing::{debug, info, warn};

/// What a finished single-population run hands back to the dispatcher.
/// The population is sorted by fitness descending, so row 0 is the
/// best lineup.
pub struct SingleRunOutput {
    pub population: LineupMatrix,
    pub fitness: Vec<f32>,
    pub best_lineup: Vec<PlayerId>,
    pub best_score: f32,
    pub best_generation: usize,
    pub time_to_best: Duration,
    pub generations_run: usize,
    pub stagnated: bool,
    pub aborted: bool,
    pub setup_time: Duration,
    pub loop_time: Duration,
    pub profiler: Profiler,
}

/// The single-lineup generational loop: weighted populate, validate,
/// then per generation elite preservation, parent selection, uniform
/// crossover, slot mutation, re-validation, and a bounded top-up that
/// replenishes rows the validators filtered away. Stops early after
/// `stop_criteria` generations without improvement or on cooperative
/// cancellation.
pub struct SingleLineupEngine<'a> {
    pool: &'a PlayerPool,
    slots: &'a SlotViews<'a>,
    ctx: &'a ValidationContext<'a>,
    config: &'a OptimizerConfig,
    control: &'a RunControl,
    validators: Vec<Box<dyn Validate>>,
    fitness: Box<dyn Fitness>,
    elite_selector: Box<dyn Select>,
    parent_selector: Box<dyn Select>,
    crossover: Box<dyn Crossover>,
    mutator: Box<dyn Mutate>,
}

impl<'a> SingleLineupEngine<'a> {
    pub fn new(
        pool: &'a PlayerPool,
        slots: &'a SlotViews<'a>,
        ctx: &'a ValidationContext<'a>,
        config: &'a OptimizerConfig,
        control: &'a RunControl,
    ) -> Self {
        SingleLineupEngine {
            pool,
            slots,
            ctx,
            config,
            control,
            validators: standard_validators(),
            fitness: registry::fitness(config),
            elite_selector: registry::selector(config.elite_method, config.tournament_size),
            parent_selector: registry::selector(config.select_method, config.tournament_size),
            crossover: registry::crossover(config.crossover_method),
            mutator: registry::mutator(config.mutation_rate),
        }
    }

    pub fn run(&self) -> GridironResult<SingleRunOutput> {
        let total = Timer::new();
        let mut profiler = Profiler::new(self.config.enable_profiling);
        let k = self.config.population_size;

        // ---- setup: initial population ----
        let setup = Timer::new();
        let mut population = self.seeded_population(k, &mut profiler)?;
        let mut fitness = self.score(&population, &mut profiler);
        sort_by_fitness(&mut population, &mut fitness);
        let setup_time = setup.elapsed();

        let mut best_lineup = population.row(0).to_vec();
        let mut best_score = fitness[0];
        let mut best_generation = 0;
        let mut time_to_best = total.elapsed();
        let mut unimproved = 0usize;
        let mut generations_run = 0usize;
        let mut stagnated = false;
        let mut aborted = false;

        info!(
            population = population.rows(),
            best = best_score,
            "single-lineup optimization started"
        );

        // ---- generational loop ----
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

            let elite_count = self.config.elite_count(population.rows());
            let select_timer = Timer::new();
            let elite_rows = self.elite_selector.select(&fitness, elite_count);
            let parent_rows = self.parent_selector.select(&fitness, k);
            profiler.record(
                metric_names::SELECT,
                (elite_rows.len() + parent_rows.len()) as f32,
                select_timer.elapsed(),
            );

            let elite = population.select_rows(&elite_rows);
            let parents = population.select_rows(&parent_rows);

            let crossover_timer = Timer::new();
            let mut children = self.crossover.crossover(&parents);
            profiler.record(
                metric_names::CROSSOVER,
                children.rows() as f32,
                crossover_timer.elapsed(),
            );

            let mutate_timer = Timer::new();
            let mutated = self.mutator.mutate(&mut children, self.slots);
            profiler.record(metric_names::MUTATE, mutated as f32, mutate_timer.elapsed());

            if self.control.is_stopped() {
                // previous generation's population is still the result
                aborted = true;
                break;
            }

            let mut next = elite;
            next.extend_from(&children);
            next = self.validate(next, &mut profiler);
            next = self.top_up(next, k, &mut profiler);

            if next.is_empty() {
                gridiron_bail!(Engine: "population collapsed after validation and top-up");
            }

            let mut next_fitness = self.score(&next, &mut profiler);
            sort_by_fitness(&mut next, &mut next_fitness);
            if next.rows() > k {
                next.truncate_rows(k);
                next_fitness.truncate(k);
            }

            population = next;
            fitness = next_fitness;

            if fitness[0] > best_score {
                best_score = fitness[0];
                best_lineup = population.row(0).to_vec();
                best_generation = generation;
                time_to_best = total.elapsed();
                unimproved = 0;
            } else {
                unimproved += 1;
            }

            generations_run = generation;
            profiler.record(metric_names::GENERATION, 1.0, gen_timer.elapsed());
            profiler.record_value(metric_names::SCORES, fitness[0]);
            profiler.record_value(metric_names::POPULATION_SIZE, population.rows() as f32);

            debug!(
                generation,
                best = best_score,
                rows = population.rows(),
                unimproved,
                "generation complete"
            );

            if self.control.is_stopped() {
                aborted = true;
                break;
            }
        }

        let loop_time = loop_timer.elapsed();

        Ok(SingleRunOutput {
            population,
            fitness,
            best_lineup,
            best_score,
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

    /// Populate + validate + top-up for the initial generation. Fails
    /// as infeasible when not even one valid lineup can be built.
    fn seeded_population(&self, k: usize, profiler: &mut Profiler) -> GridironResult<LineupMatrix> {
        let timer = Timer::new();
        let population = populate(self.slots, k);
        profiler.record(metric_names::POPULATE, population.rows() as f32, timer.elapsed());

        let population = self.validate(population, profiler);
        let population = self.top_up(population, k, profiler);

        if population.is_empty() {
            gridiron_bail!(
                Infeasible: "no valid lineup under salary cap {} after initial sampling",
                self.ctx.salary_cap
            );
        }

        Ok(population)
    }

    fn validate(&self, population: LineupMatrix, profiler: &mut Profiler) -> LineupMatrix {
        let timer = Timer::new();
        let before = population.rows();
        let population = run_validators(&self.validators, population, self.ctx);
        profiler.record(
            metric_names::VALIDATE,
            (before - population.rows()) as f32,
            timer.elapsed(),
        );
        population
    }

    fn score(&self, population: &LineupMatrix, profiler: &mut Profiler) -> Vec<f32> {
        let timer = Timer::new();
        let fitness = self.fitness.score(population, self.pool);
        profiler.record(metric_names::FITNESS, fitness.len() as f32, timer.elapsed());
        fitness
    }

    /// Replenishes a shrunken population through the same populate +
    /// validate path, under the configured retry budget. Oversampling
    /// per attempt absorbs the validators' rejection rate.
    fn top_up(&self, mut population: LineupMatrix, k: usize, profiler: &mut Profiler) -> LineupMatrix {
        let timer = Timer::new();
        let mut attempts = 0;
        let mut added = 0usize;

        while population.rows() < k && attempts < self.config.top_up_retries {
            let missing = k - population.rows();
            let before = population.rows();

            let extra = populate(self.slots, missing * 2);
            population.extend_from(&extra);
            population = run_validators(&self.validators, population, self.ctx);

            added += population.rows().saturating_sub(before);
            attempts += 1;
        }

        if population.rows() < k && attempts > 0 {
            warn!(
                rows = population.rows(),
                wanted = k,
                attempts,
                "top-up retry budget exhausted"
            );
        }

        if added > 0 || attempts > 0 {
            profiler.record(metric_names::TOP_UP, added as f32, timer.elapsed());
        }

        population
    }
}

/// Sorts the population and its fitness vector together, best first.
/// The sort is stable, so equal scores keep their lower-index order
/// and runs stay deterministic.
pub(crate) fn sort_by_fitness(population: &mut LineupMatrix, fitness: &mut Vec<f32>) {
    let mut order = (0..fitness.len()).collect::<Vec<usize>>();
    order.sort_by(|&a, &b| {
        fitness[b]
            .partial_cmp(&fitness[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    *population = population.select_rows(&order);
    *fitness = order.iter().map(|&i| fitness[i]).collect();
}
