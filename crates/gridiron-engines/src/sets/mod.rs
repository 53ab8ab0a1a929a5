mod engine;
mod ops;
mod pool;
mod sampler;

pub use engine::{SetEngine, SetRunOutput};
pub use ops::{repair_set, row_is_valid, set_crossover, set_mutate, set_score};
pub use pool::LineupPool;
pub use sampler::{fingerprint_sets, greedy_sets};
