use gridiron_core::{Select, random_provider};

/// Tournament selection: draw `size` rows uniformly, emit the fittest;
/// repeat per requested pick. Larger tournaments mean stronger
/// selection pressure.
#[derive(Debug, Clone)]
pub struct TournamentSelector {
    size: usize,
}

impl TournamentSelector {
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "tournament size must be nonzero");
        TournamentSelector { size }
    }
}

impl Select for TournamentSelector {
    fn select(&self, fitness: &[f32], count: usize) -> Vec<usize> {
        if fitness.is_empty() {
            return Vec::new();
        }

        let mut selected = Vec::with_capacity(count);
        for _ in 0..count {
            let mut best = random_provider::range(0..fitness.len());
            for _ in 1..self.size {
                let challenger = random_provider::range(0..fitness.len());
                if fitness[challenger] > fitness[best]
                    || (fitness[challenger] == fitness[best] && challenger < best)
                {
                    best = challenger;
                }
            }
            selected.push(best);
        }

        selected
    }
}
