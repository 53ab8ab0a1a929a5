use crate::config::{CrossoverMethod, DiversityMethod, OptimizerConfig, SelectorMethod};
use gridiron_alters::{SlotMutator, UniformCrossover};
use gridiron_core::{
    CaptainFitness, Crossover, Diversity, Fitness, HammingSimilarity, JaccardSimilarity, Mutate,
    ProjectedPoints, Select,
};
use gridiron_selectors::{EliteSelector, RouletteSelector, TournamentSelector};

/// Constructors for the pluggable operators, keyed by their
/// configuration names. Each operator is a capability behind a narrow
/// trait; swapping one in is a registry lookup, not a code change.
pub fn selector(method: SelectorMethod, tournament_size: usize) -> Box<dyn Select> {
    match method {
        SelectorMethod::Fittest => Box::new(EliteSelector::new()),
        SelectorMethod::Roulette => Box::new(RouletteSelector::new()),
        SelectorMethod::Tournament => Box::new(TournamentSelector::new(tournament_size)),
    }
}

pub fn crossover(method: CrossoverMethod) -> Box<dyn Crossover> {
    match method {
        CrossoverMethod::Uniform => Box::new(UniformCrossover::default()),
    }
}

pub fn mutator(mutation_rate: f32) -> Box<dyn Mutate> {
    Box::new(SlotMutator::new(mutation_rate))
}

pub fn diversity(method: DiversityMethod) -> Box<dyn Diversity> {
    match method {
        DiversityMethod::Jaccard => Box::new(JaccardSimilarity),
        DiversityMethod::Hamming => Box::new(HammingSimilarity),
    }
}

pub fn fitness(config: &OptimizerConfig) -> Box<dyn Fitness> {
    if config.captain_mode {
        Box::new(CaptainFitness::new(config.posmap.lineup_len()))
    } else {
        Box::new(ProjectedPoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_lookup_covers_every_method() {
        assert_eq!(selector(SelectorMethod::Fittest, 3).name(), "EliteSelector");
        assert_eq!(selector(SelectorMethod::Roulette, 3).name(), "RouletteSelector");
        assert_eq!(
            selector(SelectorMethod::Tournament, 3).name(),
            "TournamentSelector"
        );
    }
}
