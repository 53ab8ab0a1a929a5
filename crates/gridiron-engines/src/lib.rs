pub mod builder;
pub mod config;
pub mod control;
pub mod dispatcher;
pub mod outcome;
pub mod post_select;
pub mod registry;
pub mod sets;
pub mod single;

pub use builder::OptimizerBuilder;
pub use config::{
    CrossoverMethod, DiversityMethod, Mode, MutationIntensity, OptimizerConfig, SelectorMethod,
};
pub use control::RunControl;
pub use dispatcher::Optimizer;
pub use outcome::{DiversityMetrics, OperationStats, OptimizeOutcome, ProfilingReport};
pub use post_select::{DiversePostSelector, PostSelection};
pub use sets::{LineupPool, SetEngine};
pub use single::SingleLineupEngine;

use std::sync::Once;

static INIT_LOGGING: Once = Once::new();

/// Installs the global tracing subscriber (fmt output, `RUST_LOG`
/// filtering). Safe to call more than once; only the first call wins.
pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}
