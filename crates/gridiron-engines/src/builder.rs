use crate::config::{
    CrossoverMethod, DiversityMethod, Mode, MutationIntensity, OptimizerConfig, SelectorMethod,
};
use crate::control::RunControl;
use crate::dispatcher::Optimizer;
use gridiron_core::{
    PlayerPool, PlayerRow, Position, PositionFilter, PositionMap, PositionPool, SlotLayout,
    SlotViews,
};
use gridiron_error::{GridironResult, gridiron_bail};

/// Fluent assembly of an [Optimizer]: feed it typed player rows (or a
/// prebuilt pool) and override whichever configuration knobs the run
/// needs. `build` validates the configuration, constructs the player
/// pool, and proves the slot layout satisfiable before handing back a
/// runnable optimizer.
pub struct OptimizerBuilder {
    rows: Vec<PlayerRow>,
    pool: Option<PlayerPool>,
    config: OptimizerConfig,
    control: Option<RunControl>,
}

impl OptimizerBuilder {
    pub fn new() -> Self {
        OptimizerBuilder {
            rows: Vec::new(),
            pool: None,
            config: OptimizerConfig::default(),
            control: None,
        }
    }

    /// Typed player rows from the ingest layer.
    pub fn rows(mut self, rows: impl IntoIterator<Item = PlayerRow>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// A pool that was already built (and therefore already filtered).
    pub fn pool(mut self, pool: PlayerPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Replaces the whole configuration at once.
    pub fn config(mut self, config: OptimizerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn control(mut self, control: RunControl) -> Self {
        self.control = Some(control);
        self
    }

    pub fn population_size(mut self, size: usize) -> Self {
        self.config.population_size = size;
        self
    }

    pub fn n_generations(mut self, generations: usize) -> Self {
        self.config.n_generations = generations;
        self
    }

    pub fn stop_criteria(mut self, generations: usize) -> Self {
        self.config.stop_criteria = generations;
        self
    }

    pub fn elite_divisor(mut self, divisor: usize) -> Self {
        self.config.elite_divisor = divisor;
        self
    }

    pub fn elite_method(mut self, method: SelectorMethod) -> Self {
        self.config.elite_method = method;
        self
    }

    pub fn select_method(mut self, method: SelectorMethod) -> Self {
        self.config.select_method = method;
        self
    }

    pub fn crossover_method(mut self, method: CrossoverMethod) -> Self {
        self.config.crossover_method = method;
        self
    }

    pub fn mutation_rate(mut self, rate: f32) -> Self {
        self.config.mutation_rate = rate;
        self
    }

    pub fn tournament_size(mut self, size: usize) -> Self {
        self.config.tournament_size = size;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn target_lineups(mut self, count: usize) -> Self {
        self.config.target_lineups = count;
        self
    }

    pub fn diversity_weight(mut self, weight: f32) -> Self {
        self.config.diversity_weight = weight;
        self
    }

    pub fn min_overlap_threshold(mut self, threshold: f32) -> Self {
        self.config.min_overlap_threshold = threshold;
        self
    }

    pub fn diversity_method(mut self, method: DiversityMethod) -> Self {
        self.config.diversity_method = method;
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn lineup_pool_size(mut self, size: usize) -> Self {
        self.config.lineup_pool_size = size;
        self
    }

    pub fn salary_cap(mut self, cap: u64) -> Self {
        self.config.salary_cap = cap;
        self
    }

    pub fn posmap(mut self, posmap: PositionMap) -> Self {
        self.config.posmap = posmap;
        self
    }

    pub fn flex_positions(mut self, positions: impl IntoIterator<Item = Position>) -> Self {
        self.config.flex_positions = positions.into_iter().collect();
        self
    }

    pub fn posfilter(mut self, filter: PositionFilter) -> Self {
        self.config.posfilter = filter;
        self
    }

    pub fn enable_profiling(mut self, enabled: bool) -> Self {
        self.config.enable_profiling = enabled;
        self
    }

    pub fn mutation_intensity(mut self, intensity: MutationIntensity) -> Self {
        self.config.mutation_intensity = intensity;
        self
    }

    pub fn pool_refresh_interval(mut self, interval: usize) -> Self {
        self.config.pool_refresh_interval = Some(interval);
        self
    }

    pub fn captain_mode(mut self, enabled: bool) -> Self {
        self.config.captain_mode = enabled;
        self
    }

    /// Validates everything that can be validated before a run: the
    /// configuration itself, the player table, and that every slot of
    /// the layout has at least one eligible player. Data problems that
    /// leave a slot unfillable surface here as configuration errors.
    pub fn build(self) -> GridironResult<Optimizer> {
        self.config.validate()?;

        let pool = match self.pool {
            Some(pool) => pool,
            None => {
                if self.rows.is_empty() {
                    gridiron_bail!(InvalidConfig: "no player rows or pool supplied");
                }
                PlayerPool::from_rows(self.rows, &self.config.allowed_positions())?
            }
        };

        // prove the layout satisfiable once, up front
        let layout = SlotLayout::from_map(&self.config.posmap);
        let position_pool =
            PositionPool::new(&pool, &self.config.posfilter, &self.config.flex_positions)?;
        SlotViews::resolve(&position_pool, &layout)?;

        Ok(Optimizer::assembled(
            pool,
            self.config,
            self.control.unwrap_or_default(),
        ))
    }
}

impl Default for OptimizerBuilder {
    fn default() -> Self {
        OptimizerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<PlayerRow> {
        vec![
            PlayerRow::new("q1", "QB", 9_000, 20.0),
            PlayerRow::new("r1", "RB", 8_000, 15.0),
            PlayerRow::new("r2", "RB", 7_000, 12.0),
        ]
    }

    #[test]
    fn build_rejects_empty_input() {
        assert!(OptimizerBuilder::new().build().is_err());
    }

    #[test]
    fn build_rejects_unfillable_slots() {
        // classic posmap needs WR/TE/DST players too
        let built = OptimizerBuilder::new().rows(rows()).build();
        assert!(built.is_err());
    }

    #[test]
    fn build_accepts_a_satisfiable_layout() {
        let posmap = PositionMap::new().with("QB", 1).with("RB", 2);
        let built = OptimizerBuilder::new()
            .rows(rows())
            .posmap(posmap)
            .flex_positions([Position::new("RB")])
            .build();

        assert!(built.is_ok());
    }
}
