use crate::ProbabilityWheelIterator;
use gridiron_core::Select;

/// Fitness-proportionate selection. Scores are shifted non-negative
/// when needed, normalized into a distribution, and sampled with
/// replacement off the wheel.
#[derive(Debug, Default)]
pub struct RouletteSelector;

impl RouletteSelector {
    pub fn new() -> Self {
        RouletteSelector
    }
}

impl Select for RouletteSelector {
    fn select(&self, fitness: &[f32], count: usize) -> Vec<usize> {
        if fitness.is_empty() {
            return Vec::new();
        }

        let min = fitness.iter().copied().fold(f32::MAX, f32::min);
        let shift = if min < 0.0 { -min } else { 0.0 };

        let mut weights = fitness.iter().map(|f| f + shift).collect::<Vec<f32>>();
        let sum: f32 = weights.iter().sum();
        if sum <= 0.0 {
            // flat landscape degenerates to uniform selection
            let uniform = 1.0 / weights.len() as f32;
            weights.iter_mut().for_each(|w| *w = uniform);
        } else {
            weights.iter_mut().for_each(|w| *w /= sum);
        }

        ProbabilityWheelIterator::new(&weights, count).collect()
    }
}
