/// A selection policy over a scored population. Selection sees only
/// the fitness vector; row `r` of the fitness vector corresponds to
/// row `r` of the population matrix, and selectors return row indexes
/// for the engine to gather.
pub trait Select: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
            .split("<")
            .next()
            .unwrap_or(std::any::type_name::<Self>())
            .split("::")
            .last()
            .unwrap_or("Unknown Selector")
    }

    fn select(&self, fitness: &[f32], count: usize) -> Vec<usize>;
}
