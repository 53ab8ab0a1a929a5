mod elite;
mod roulette;
mod tournament;

pub use elite::EliteSelector;
pub use roulette::RouletteSelector;
pub use tournament::TournamentSelector;

use gridiron_core::random_provider;

/// Draws indexes from a normalized probability vector by spinning a
/// cumulative wheel `count` times.
pub struct ProbabilityWheelIterator {
    cdf: Vec<f32>,
    remaining: usize,
}

impl ProbabilityWheelIterator {
    pub fn new(probabilities: &[f32], count: usize) -> Self {
        let mut cdf = Vec::with_capacity(probabilities.len());
        let mut running = 0.0;
        for p in probabilities {
            running += p;
            cdf.push(running);
        }
        if let Some(last) = cdf.last_mut() {
            *last = 1.0;
        }

        ProbabilityWheelIterator {
            cdf,
            remaining: count,
        }
    }
}

impl Iterator for ProbabilityWheelIterator {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 || self.cdf.is_empty() {
            return None;
        }

        self.remaining -= 1;
        Some(random_provider::cdf_index(&self.cdf))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
