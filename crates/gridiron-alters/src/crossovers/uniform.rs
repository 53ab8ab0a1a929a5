use gridiron_core::{Crossover, LineupMatrix, random_provider};

/// Uniform per-cell crossover. The selected parents are split into two
/// equal halves; for every pair a boolean mask decides, column by
/// column, which parent each child inherits from. Because both parents
/// occupy the same canonical slot layout, a child's slot `c` always
/// comes from some parent's slot `c` and position structure is
/// preserved for free.
#[derive(Debug, Clone)]
pub struct UniformCrossover {
    swap_rate: f32,
}

impl UniformCrossover {
    pub fn new(swap_rate: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&swap_rate),
            "swap rate {swap_rate} is not a probability"
        );
        UniformCrossover { swap_rate }
    }
}

impl Default for UniformCrossover {
    fn default() -> Self {
        UniformCrossover::new(0.5)
    }
}

impl Crossover for UniformCrossover {
    fn crossover(&self, parents: &LineupMatrix) -> LineupMatrix {
        let cols = parents.cols();
        let half = parents.rows() / 2;
        let mut children = LineupMatrix::with_capacity(half * 2, cols);

        let mut first = vec![0; cols];
        let mut second = vec![0; cols];
        for pair in 0..half {
            let a = parents.row(pair);
            let b = parents.row(half + pair);

            for c in 0..cols {
                if random_provider::bool(self.swap_rate) {
                    first[c] = a[c];
                    second[c] = b[c];
                } else {
                    first[c] = b[c];
                    second[c] = a[c];
                }
            }

            children.push_row(&first);
            children.push_row(&second);
        }

        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_cells_come_from_a_parent_column() {
        random_provider::set_seed(5);

        let parents = LineupMatrix::from_vec(
            vec![
                1, 2, 3, //
                4, 5, 6, //
                7, 8, 9, //
                10, 11, 12,
            ],
            3,
        );

        let children = UniformCrossover::default().crossover(&parents);
        assert_eq!(children.rows(), 4);

        for pair in 0..2 {
            let a = parents.row(pair);
            let b = parents.row(2 + pair);
            let c1 = children.row(pair * 2);
            let c2 = children.row(pair * 2 + 1);

            for col in 0..3 {
                assert!(c1[col] == a[col] || c1[col] == b[col]);
                // the two children are complementary
                assert_eq!(
                    [c1[col], c2[col]],
                    if c1[col] == a[col] { [a[col], b[col]] } else { [b[col], a[col]] }
                );
            }
        }
    }

    #[test]
    fn odd_parent_is_dropped() {
        random_provider::set_seed(5);

        let parents = LineupMatrix::from_vec(vec![1, 2, 3, 4, 5, 6], 2);
        let children = UniformCrossover::default().crossover(&parents);

        assert_eq!(children.rows(), 2);
    }

    #[test]
    fn zero_rate_copies_swapped_halves() {
        let parents = LineupMatrix::from_vec(vec![1, 2, 3, 4], 2);
        let children = UniformCrossover::new(0.0).crossover(&parents);

        assert_eq!(children.row(0), &[3, 4]);
        assert_eq!(children.row(1), &[1, 2]);
    }
}
