use crate::matrix::LineupMatrix;
use crate::pool::PlayerId;

/// A similarity measure between two lineups, in `[0, 1]` where 1.0
/// means identical. Used by the diverse post-selector and by the
/// set-level fitness penalty.
pub trait Diversity: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
            .split("<")
            .next()
            .unwrap_or(std::any::type_name::<Self>())
            .split("::")
            .last()
            .unwrap_or("Unknown Diversity")
    }

    fn measure(&self, one: &[PlayerId], two: &[PlayerId]) -> f32;
}

impl<F> Diversity for F
where
    F: Fn(&[PlayerId], &[PlayerId]) -> f32 + Send + Sync,
{
    fn measure(&self, one: &[PlayerId], two: &[PlayerId]) -> f32 {
        (self)(one, two)
    }
}

/// Jaccard similarity of the two rows' id sets: |intersection| over
/// |union|, ignoring slot assignment.
#[derive(Debug, Default, Clone)]
pub struct JaccardSimilarity;

impl Diversity for JaccardSimilarity {
    fn measure(&self, one: &[PlayerId], two: &[PlayerId]) -> f32 {
        if one.is_empty() && two.is_empty() {
            return 1.0;
        }

        let mut a = one.to_vec();
        let mut b = two.to_vec();
        a.sort_unstable();
        a.dedup();
        b.sort_unstable();
        b.dedup();

        let mut intersection = 0usize;
        let (mut i, mut j) = (0usize, 0usize);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    intersection += 1;
                    i += 1;
                    j += 1;
                }
            }
        }

        let union = a.len() + b.len() - intersection;
        intersection as f32 / union as f32
    }
}

/// Hamming similarity: the fraction of slots holding the same id in
/// the same column.
#[derive(Debug, Default, Clone)]
pub struct HammingSimilarity;

impl Diversity for HammingSimilarity {
    fn measure(&self, one: &[PlayerId], two: &[PlayerId]) -> f32 {
        if one.is_empty() {
            return 1.0;
        }

        let matches = one.iter().zip(two).filter(|(a, b)| a == b).count();
        matches as f32 / one.len() as f32
    }
}

/// Full pairwise similarity matrix over the rows of a population.
/// Symmetric with a unit diagonal; O(K^2 * L).
pub fn pairwise_matrix(population: &LineupMatrix, diversity: &dyn Diversity) -> Vec<Vec<f32>> {
    let n = population.rows();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let sim = diversity.measure(population.row(i), population.row(j));
            matrix[i][j] = sim;
            matrix[j][i] = sim;
        }
    }

    matrix
}

/// Mean of the upper triangle of a pairwise matrix; 0.0 when there are
/// fewer than two rows.
pub fn mean_pairwise(matrix: &[Vec<f32>]) -> f32 {
    let n = matrix.len();
    if n < 2 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            sum += matrix[i][j];
        }
    }

    sum / (n * (n - 1) / 2) as f32
}

/// Minimum off-diagonal similarity; 0.0 when fewer than two rows.
pub fn min_pairwise(matrix: &[Vec<f32>]) -> f32 {
    let n = matrix.len();
    if n < 2 {
        return 0.0;
    }

    let mut min = f32::MAX;
    for i in 0..n {
        for j in (i + 1)..n {
            min = min.min(matrix[i][j]);
        }
    }

    min
}

/// Maximum off-diagonal similarity; 0.0 when fewer than two rows.
pub fn max_pairwise(matrix: &[Vec<f32>]) -> f32 {
    let n = matrix.len();
    if n < 2 {
        return 0.0;
    }

    let mut max = f32::MIN;
    for i in 0..n {
        for j in (i + 1)..n {
            max = max.max(matrix[i][j]);
        }
    }

    max
}
