pub mod alter;
pub mod diversity;
pub mod domain;
pub mod fingerprint;
pub mod fitness;
pub mod matrix;
pub mod pool;
pub mod populate;
pub mod position;
pub mod position_pool;
pub mod select;
pub mod slots;
pub mod stats;
pub mod validate;

pub use alter::{Crossover, Mutate};
pub use diversity::{
    Diversity, HammingSimilarity, JaccardSimilarity, max_pairwise, mean_pairwise, min_pairwise,
    pairwise_matrix,
};
pub use domain::random_provider;
pub use fingerprint::Fingerprint;
pub use fitness::{CaptainFitness, Fitness, ProjectedPoints};
pub use matrix::LineupMatrix;
pub use pool::{PlayerId, PlayerPool, PlayerRow};
pub use populate::populate;
pub use position::Position;
pub use position_pool::{PositionFilter, PositionPool, PositionView, SlotViews};
pub use select::Select;
pub use slots::{PositionMap, SlotLayout};
pub use stats::{Metric, MetricSet, Profiler, Statistic, TimeStatistic, Timer, metric_names};
pub use validate::{
    DistinctLineups, NoDuplicatePlayers, PositionStructure, SalaryCap, Validate,
    ValidationContext, run_validators, standard_validators,
};

pub mod prelude {
    pub use super::alter::{Crossover, Mutate};
    pub use super::diversity::{Diversity, HammingSimilarity, JaccardSimilarity};
    pub use super::domain::random_provider;
    pub use super::fitness::{CaptainFitness, Fitness, ProjectedPoints};
    pub use super::matrix::LineupMatrix;
    pub use super::pool::{PlayerId, PlayerPool, PlayerRow};
    pub use super::position::Position;
    pub use super::position_pool::{PositionFilter, PositionPool, PositionView, SlotViews};
    pub use super::select::Select;
    pub use super::slots::{PositionMap, SlotLayout};
    pub use super::stats::{Metric, MetricSet, Profiler, Statistic, TimeStatistic, Timer};
    pub use super::validate::{Validate, ValidationContext};
}
