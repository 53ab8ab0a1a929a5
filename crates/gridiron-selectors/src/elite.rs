use gridiron_core::Select;

/// Selects the top-`count` rows by fitness, ties broken by row index.
/// Registered as `fittest`; this is also the elitism selector.
#[derive(Debug, Default)]
pub struct EliteSelector;

impl EliteSelector {
    pub fn new() -> Self {
        EliteSelector
    }
}

impl Select for EliteSelector {
    fn select(&self, fitness: &[f32], count: usize) -> Vec<usize> {
        let mut indexes = (0..fitness.len()).collect::<Vec<usize>>();
        // stable sort keeps the lower index first among equal scores
        indexes.sort_by(|&a, &b| fitness[b].partial_cmp(&fitness[a]).unwrap_or(std::cmp::Ordering::Equal));
        indexes.truncate(count.min(fitness.len()));
        indexes
    }
}
