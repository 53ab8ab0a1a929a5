use crate::matrix::LineupMatrix;
use crate::position_pool::SlotViews;

/// Recombination over a selected parent population. Implementations
/// must preserve the column/slot semantics of the canonical layout:
/// the child's slot `c` is always filled from some parent's slot `c`.
pub trait Crossover: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
            .split("<")
            .next()
            .unwrap_or(std::any::type_name::<Self>())
            .split("::")
            .last()
            .unwrap_or("Unknown Crossover")
    }

    fn crossover(&self, parents: &LineupMatrix) -> LineupMatrix;
}

/// In-place mutation over a population. Implementations resample cells
/// through [SlotViews], which keeps slot invariants intact; duplicate
/// players and cap violations introduced here are the next validation
/// pass's problem. Returns the number of mutated cells for metrics.
pub trait Mutate: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
            .split("<")
            .next()
            .unwrap_or(std::any::type_name::<Self>())
            .split("::")
            .last()
            .unwrap_or("Unknown Mutator")
    }

    fn mutate(&self, population: &mut LineupMatrix, slots: &SlotViews<'_>) -> usize;
}
