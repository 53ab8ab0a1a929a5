use crate::config::OptimizerConfig;
use crate::outcome::DiversityMetrics;
use crate::registry;
use gridiron_core::{
    Diversity, LineupMatrix, PlayerId, max_pairwise, mean_pairwise, min_pairwise, pairwise_matrix,
};
use tracing::{debug, warn};

/// How far the overlap threshold decays per relaxation step, and the
/// floor below which diversity is abandoned for fitness order.
const RELAXATION_FACTOR: f32 = 0.7;
const RELAXATION_FLOOR: f32 = 0.05;

/// The post-selector's pick: up to `target_lineups` rows, best first,
/// with their scores and the pairwise-similarity summary.
pub struct PostSelection {
    pub lineups: Vec<Vec<PlayerId>>,
    pub scores: Vec<f32>,
    pub metrics: DiversityMetrics,
    /// The overlap threshold had to be relaxed to fill the request.
    pub relaxed: bool,
    /// Fewer rows than requested existed even after full relaxation.
    pub shortfall: bool,
}

/// Greedily picks `target_lineups` mutually diverse, high-fitness rows
/// out of a finished population. The first pick is the fittest row;
/// each later pick maximizes `fitness - weight * max_similarity * scale`
/// among candidates under the overlap threshold, relaxing the
/// threshold geometrically when no candidate qualifies.
pub struct DiversePostSelector<'a> {
    config: &'a OptimizerConfig,
    diversity: Box<dyn Diversity>,
}

impl<'a> DiversePostSelector<'a> {
    pub fn new(config: &'a OptimizerConfig) -> Self {
        DiversePostSelector {
            config,
            diversity: registry::diversity(config.diversity_method),
        }
    }

    /// `population` must be sorted by fitness descending, which is how
    /// the single-lineup engine returns it.
    pub fn select(&self, population: &LineupMatrix, fitness: &[f32]) -> PostSelection {
        let target = self.config.target_lineups;
        let rows = population.rows();
        let weight = self.config.diversity_weight;

        // similarity is unitless; median fitness puts the penalty in
        // fitness units
        let scale = median(fitness);

        let mut chosen: Vec<usize> = Vec::with_capacity(target);
        let mut max_sim = vec![0.0f32; rows];
        let mut threshold = self.config.min_overlap_threshold;
        let mut relaxed = false;

        if rows > 0 && target > 0 {
            chosen.push(0);
            self.absorb(population, 0, &mut max_sim);
        }

        while chosen.len() < target && chosen.len() < rows {
            let mut pick: Option<(usize, f32)> = None;
            for candidate in 0..rows {
                if chosen.contains(&candidate) {
                    continue;
                }

                if max_sim[candidate] > 1.0 - threshold {
                    continue;
                }

                let score = fitness[candidate] - weight * max_sim[candidate] * scale;
                match pick {
                    Some((_, best)) if score <= best => {}
                    _ => pick = Some((candidate, score)),
                }
            }

            match pick {
                Some((candidate, _)) => {
                    chosen.push(candidate);
                    self.absorb(population, candidate, &mut max_sim);
                }
                None => {
                    threshold *= RELAXATION_FACTOR;
                    relaxed = true;

                    if threshold < RELAXATION_FLOOR {
                        // diversity exhausted; fall back to fitness order
                        warn!(
                            chosen = chosen.len(),
                            target, "overlap threshold floored, filling by fitness"
                        );
                        for candidate in 0..rows {
                            if chosen.len() == target {
                                break;
                            }
                            if !chosen.contains(&candidate) {
                                chosen.push(candidate);
                            }
                        }
                        break;
                    }

                    debug!(threshold, "relaxing overlap threshold");
                }
            }
        }

        let shortfall = chosen.len() < target;
        let selected = population.select_rows(&chosen);
        let matrix = pairwise_matrix(&selected, self.diversity.as_ref());

        PostSelection {
            lineups: chosen.iter().map(|&r| population.row(r).to_vec()).collect(),
            scores: chosen.iter().map(|&r| fitness[r]).collect(),
            metrics: DiversityMetrics {
                avg_overlap: mean_pairwise(&matrix),
                min_overlap: min_pairwise(&matrix),
                max_overlap: max_pairwise(&matrix),
                pairwise_matrix: matrix,
            },
            relaxed,
            shortfall,
        }
    }

    /// Folds a newly chosen row into every candidate's
    /// max-similarity-to-the-chosen-set, keeping the greedy step O(K)
    /// per pick instead of O(K * N).
    fn absorb(&self, population: &LineupMatrix, chosen_row: usize, max_sim: &mut [f32]) {
        let chosen = population.row(chosen_row);
        for (candidate, slot) in max_sim.iter_mut().enumerate() {
            let sim = self.diversity.measure(population.row(candidate), chosen);
            if sim > *slot {
                *slot = sim;
            }
        }
    }
}

fn median(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
