use gridiron_core::{Position, PositionFilter, PositionMap};
use gridiron_error::{GridironResult, ensure};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Named selection policies, resolvable through the
/// [registry](crate::registry).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SelectorMethod {
    #[default]
    Fittest,
    Roulette,
    Tournament,
}

/// Named crossover operators. Uniform is the only shipped operator;
/// the enum exists so configurations stay forward-compatible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CrossoverMethod {
    #[default]
    Uniform,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DiversityMethod {
    #[default]
    Jaccard,
    Hamming,
}

/// How multilineup requests are served: evolve one population and pick
/// a diverse subset afterwards, or evolve sets of lineups directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mode {
    PostProcessing,
    #[default]
    SetBased,
}

/// Mix of single-slot swaps vs whole-lineup pool injection applied by
/// set-level mutation. Adaptive starts low and escalates as
/// generations pass without improvement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MutationIntensity {
    Low,
    #[default]
    Medium,
    High,
    Adaptive,
}

impl MutationIntensity {
    /// Probability that a mutated lineup is replaced wholesale from
    /// the lineup pool instead of having one slot swapped.
    pub fn injection_probability(&self, unimproved_generations: usize) -> f32 {
        match self {
            MutationIntensity::Low => 0.1,
            MutationIntensity::Medium => 0.5,
            MutationIntensity::High => 0.8,
            MutationIntensity::Adaptive => (0.1 + 0.1 * unimproved_generations as f32).min(0.8),
        }
    }
}

/// Every knob the optimizer recognizes, with the defaults applied by
/// [OptimizerConfig::default]. Ingest options (file paths, column
/// mappings) belong to the layer that produces [gridiron_core::PlayerRow]s
/// and are not represented here.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimizerConfig {
    /// Rows in the population (lineups, or sets in set-based mode).
    pub population_size: usize,
    /// Max generations.
    pub n_generations: usize,
    /// Consecutive no-improvement generations before early stop.
    pub stop_criteria: usize,
    /// Elite count = population_size / elite_divisor, clamped to >= 1.
    pub elite_divisor: usize,
    pub elite_method: SelectorMethod,
    pub select_method: SelectorMethod,
    pub crossover_method: CrossoverMethod,
    /// Per-cell mutation probability.
    pub mutation_rate: f32,
    /// Tournament size when a tournament selector is configured.
    pub tournament_size: usize,
    /// RNG seed; runs with the same seed, pool, and config reproduce
    /// bit-identical populations.
    pub seed: Option<u64>,
    /// 1 = single lineup, > 1 = multilineup.
    pub target_lineups: usize,
    pub diversity_weight: f32,
    pub min_overlap_threshold: f32,
    pub diversity_method: DiversityMethod,
    pub mode: Mode,
    /// Size of the sampled lineup pool backing set-based mode.
    pub lineup_pool_size: usize,
    pub salary_cap: u64,
    pub posmap: PositionMap,
    pub flex_positions: Vec<Position>,
    pub posfilter: PositionFilter,
    pub enable_profiling: bool,
    /// Set-level mutation mix.
    pub mutation_intensity: MutationIntensity,
    /// Every this many generations, the worst slice of the lineup
    /// pool's elite portion is replaced by the best lineups seen in
    /// the evolving sets. None disables pool evolution.
    pub pool_refresh_interval: Option<usize>,
    /// Bounded retries when topping a shrunken population back up.
    pub top_up_retries: usize,
    /// Score slot 0 at 1.5x (captain mode) instead of flat sums.
    pub captain_mode: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            population_size: 5_000,
            n_generations: 20,
            stop_criteria: 10,
            elite_divisor: 5,
            elite_method: SelectorMethod::Fittest,
            select_method: SelectorMethod::Roulette,
            crossover_method: CrossoverMethod::Uniform,
            mutation_rate: 0.05,
            tournament_size: 3,
            seed: None,
            target_lineups: 1,
            diversity_weight: 0.2,
            min_overlap_threshold: 0.2,
            diversity_method: DiversityMethod::Jaccard,
            mode: Mode::SetBased,
            lineup_pool_size: 25_000,
            salary_cap: 50_000,
            posmap: PositionMap::classic(),
            flex_positions: vec![
                Position::new("RB"),
                Position::new("WR"),
                Position::new("TE"),
            ],
            posfilter: PositionFilter::new(),
            enable_profiling: false,
            mutation_intensity: MutationIntensity::default(),
            pool_refresh_interval: None,
            top_up_retries: 5,
            captain_mode: false,
        }
    }
}

impl OptimizerConfig {
    /// Elite count for a population of `rows`, never below one.
    pub fn elite_count(&self, rows: usize) -> usize {
        (rows / self.elite_divisor).max(1)
    }

    /// Positions a player row may legally carry: everything named in
    /// the posmap (FLEX aside) plus the FLEX-eligible set.
    pub fn allowed_positions(&self) -> Vec<Position> {
        let mut allowed = Vec::new();
        for position in self.posmap.positions() {
            if !position.is_flex() && !allowed.contains(position) {
                allowed.push(position.clone());
            }
        }
        for position in &self.flex_positions {
            if !allowed.contains(position) {
                allowed.push(position.clone());
            }
        }
        allowed
    }

    /// Fatal configuration problems, caught before any work happens.
    pub fn validate(&self) -> GridironResult<()> {
        ensure!(self.population_size > 0, InvalidConfig: "population_size must be > 0");
        ensure!(self.n_generations > 0, InvalidConfig: "n_generations must be > 0");
        ensure!(self.stop_criteria > 0, InvalidConfig: "stop_criteria must be > 0");
        ensure!(self.elite_divisor > 0, InvalidConfig: "elite_divisor must be > 0");
        ensure!(self.tournament_size > 0, InvalidConfig: "tournament_size must be > 0");
        ensure!(
            (0.0..=1.0).contains(&self.mutation_rate),
            InvalidConfig: "mutation_rate {} is not a probability", self.mutation_rate
        );
        ensure!(self.salary_cap > 0, InvalidConfig: "salary_cap must be > 0");
        ensure!(!self.posmap.is_empty(), InvalidConfig: "posmap has no slots");
        ensure!(self.target_lineups > 0, InvalidConfig: "target_lineups must be > 0");
        ensure!(
            (0.0..=1.0).contains(&self.min_overlap_threshold),
            InvalidConfig: "min_overlap_threshold {} is not in [0, 1]", self.min_overlap_threshold
        );
        ensure!(
            self.diversity_weight >= 0.0,
            InvalidConfig: "diversity_weight must be non-negative"
        );
        ensure!(
            self.posmap.flex_slots() == 0 || !self.flex_positions.is_empty(),
            InvalidConfig: "posmap has FLEX slots but flex_positions is empty"
        );

        if self.target_lineups > 1 && self.mode == Mode::SetBased {
            ensure!(
                self.lineup_pool_size >= self.target_lineups,
                InvalidConfig: "lineup_pool_size {} is smaller than target_lineups {}",
                self.lineup_pool_size,
                self.target_lineups
            );
        }

        Ok(())
    }
}
