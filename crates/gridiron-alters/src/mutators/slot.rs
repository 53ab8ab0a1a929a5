use gridiron_core::{LineupMatrix, Mutate, SlotViews, random_provider};

/// Uniform per-cell mutation: each cell is overwritten, with the given
/// probability, by a fresh weighted draw from the view backing its
/// slot (the FLEX view for FLEX slots). Slot structure is preserved by
/// construction; any duplicate players or cap violations introduced
/// here are caught by the next validation pass.
#[derive(Debug, Clone)]
pub struct SlotMutator {
    rate: f32,
}

impl SlotMutator {
    pub fn new(rate: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&rate),
            "mutation rate {rate} is not a probability"
        );
        SlotMutator { rate }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }
}

impl Mutate for SlotMutator {
    fn mutate(&self, population: &mut LineupMatrix, slots: &SlotViews<'_>) -> usize {
        let cols = population.cols();
        let cells = population.rows() * cols;

        let targets = random_provider::cond_indices(0..cells, self.rate);
        let data = population.as_mut_slice();
        for &cell in &targets {
            data[cell] = slots.view(cell % cols).sample();
        }

        targets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridiron_core::{
        PlayerPool, PlayerRow, Position, PositionFilter, PositionMap, PositionPool, SlotLayout,
        populate,
    };

    fn fixture() -> (PlayerPool, PositionPool, SlotLayout) {
        let allowed = vec![Position::new("QB"), Position::new("RB")];
        let pool = PlayerPool::from_rows(
            vec![
                PlayerRow::new("q1", "QB", 100, 10.0),
                PlayerRow::new("q2", "QB", 110, 12.0),
                PlayerRow::new("r1", "RB", 80, 6.0),
                PlayerRow::new("r2", "RB", 90, 7.0),
                PlayerRow::new("r3", "RB", 85, 6.5),
            ],
            &allowed,
        )
        .unwrap();

        let position_pool = PositionPool::new(&pool, &PositionFilter::new(), &[]).unwrap();
        let layout = SlotLayout::from_map(&PositionMap::new().with("QB", 1).with("RB", 2));

        (pool, position_pool, layout)
    }

    #[test]
    fn mutation_preserves_slot_positions() {
        random_provider::set_seed(3);

        let (pool, position_pool, layout) = fixture();
        let slots = SlotViews::resolve(&position_pool, &layout).unwrap();
        let mut population = populate(&slots, 40);

        let mutated = SlotMutator::new(0.5).mutate(&mut population, &slots);
        assert!(mutated > 0);

        for row in population.iter_rows() {
            assert_eq!(pool.position(row[0]), &Position::new("QB"));
            assert_eq!(pool.position(row[1]), &Position::new("RB"));
            assert_eq!(pool.position(row[2]), &Position::new("RB"));
        }
    }

    #[test]
    fn zero_rate_mutates_nothing() {
        let (_, position_pool, layout) = fixture();
        let slots = SlotViews::resolve(&position_pool, &layout).unwrap();
        let mut population = populate(&slots, 10);
        let before = population.clone();

        let mutated = SlotMutator::new(0.0).mutate(&mut population, &slots);
        assert_eq!(mutated, 0);
        assert_eq!(population, before);
    }
}
