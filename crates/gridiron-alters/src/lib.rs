mod crossovers;
mod mutators;

pub use crossovers::UniformCrossover;
pub use mutators::SlotMutator;
