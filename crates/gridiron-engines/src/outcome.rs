use gridiron_core::{LineupMatrix, MetricSet, PlayerId};
use std::collections::BTreeMap;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pairwise-similarity summary for a returned group of lineups.
/// Overlap here is the configured similarity measure (Jaccard or
/// Hamming), so lower is more diverse.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiversityMetrics {
    pub avg_overlap: f32,
    pub min_overlap: f32,
    pub max_overlap: f32,
    pub pairwise_matrix: Vec<Vec<f32>>,
}

/// Aggregate timing for one profiled operation, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OperationStats {
    pub total: f32,
    pub count: u32,
    pub avg: f32,
    pub min: f32,
    pub max: f32,
}

/// Wall-clock accounting for a run, present when profiling is enabled.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProfilingReport {
    pub total_time: Duration,
    pub setup_time: Duration,
    pub loop_time: Duration,
    pub time_to_best_solution: Duration,
    pub best_solution_generation: usize,
    pub operations: BTreeMap<String, OperationStats>,
}

impl ProfilingReport {
    /// Folds a [MetricSet]'s timed operations into the report's
    /// per-operation table.
    pub fn with_operations(mut self, metrics: &MetricSet) -> Self {
        for metric in metrics.iter_sorted() {
            let time = metric.time();
            if time.count() == 0 {
                continue;
            }

            self.operations.insert(
                metric.name().to_string(),
                OperationStats {
                    total: time.sum().as_secs_f32(),
                    count: time.count(),
                    avg: time.mean().as_secs_f32(),
                    min: time.min().as_secs_f32(),
                    max: time.max().as_secs_f32(),
                },
            );
        }

        self
    }
}

/// The result of one optimization run. Always carries a best lineup
/// and the final population; the multilineup fields are present in
/// post-processing and set-based modes. Soft stop conditions
/// (stagnation, cancellation, diversity relaxation or shortfall) are
/// flags here, never errors.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimizeOutcome {
    pub best_lineup: Vec<PlayerId>,
    pub best_score: f32,
    pub population: LineupMatrix,
    pub fitness: Vec<f32>,

    /// Multilineup result, highest score first.
    pub lineups: Option<Vec<Vec<PlayerId>>>,
    pub scores: Option<Vec<f32>>,
    pub diversity_metrics: Option<DiversityMetrics>,

    pub profiling: Option<ProfilingReport>,

    /// The loop stopped early on `stop_criteria` unimproved generations.
    pub stagnated: bool,
    /// The loop was cancelled or timed out; the result is best-so-far.
    pub aborted: bool,
    /// The post-selector had to relax its overlap threshold.
    pub diversity_relaxed: bool,
    /// Fewer diverse lineups than requested even after full relaxation.
    pub diversity_shortfall: bool,

    pub generations_run: usize,
    pub best_solution_generation: usize,
}

impl OptimizeOutcome {
    /// The whole outcome as pretty-printed JSON, for export layers
    /// that sit outside this crate.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub(crate) fn single(best_lineup: Vec<PlayerId>, best_score: f32, population: LineupMatrix, fitness: Vec<f32>) -> Self {
        OptimizeOutcome {
            best_lineup,
            best_score,
            population,
            fitness,
            lineups: None,
            scores: None,
            diversity_metrics: None,
            profiling: None,
            stagnated: false,
            aborted: false,
            diversity_relaxed: false,
            diversity_shortfall: false,
            generations_run: 0,
            best_solution_generation: 0,
        }
    }
}
