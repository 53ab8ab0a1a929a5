use crate::matrix::LineupMatrix;
use crate::pool::{PlayerId, PlayerPool};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Lineup scoring over a population. Scoring is pure: the same
/// population and pool always produce the same fitness vector.
pub trait Fitness: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
            .split("<")
            .next()
            .unwrap_or(std::any::type_name::<Self>())
            .split("::")
            .last()
            .unwrap_or("Unknown Fitness")
    }

    fn score_row(&self, row: &[PlayerId], pool: &PlayerPool) -> f32;

    /// Scores every row. The default is a contiguous gather + row sum
    /// over the flat matrix, one pass, parallelized over rows when the
    /// `rayon` feature is enabled (row scoring is RNG-free, so the
    /// result is identical either way).
    fn score(&self, population: &LineupMatrix, pool: &PlayerPool) -> Vec<f32> {
        #[cfg(feature = "rayon")]
        {
            population
                .as_slice()
                .par_chunks_exact(population.cols())
                .map(|row| self.score_row(row, pool))
                .collect()
        }

        #[cfg(not(feature = "rayon"))]
        {
            population
                .iter_rows()
                .map(|row| self.score_row(row, pool))
                .collect()
        }
    }
}

/// The default fitness: the sum of projected points across the row.
#[derive(Debug, Default, Clone)]
pub struct ProjectedPoints;

impl Fitness for ProjectedPoints {
    #[inline]
    fn score_row(&self, row: &[PlayerId], pool: &PlayerPool) -> f32 {
        pool.lineup_points(row)
    }
}

/// Per-slot coefficient fitness. The stock configuration is captain
/// mode: a 1.5x multiplier on slot 0 and 1.0 elsewhere, but any
/// coefficient vector of lineup length works.
#[derive(Debug, Clone)]
pub struct CaptainFitness {
    coefficients: Vec<f32>,
}

impl CaptainFitness {
    pub fn new(lineup_len: usize) -> Self {
        Self::with_multiplier(lineup_len, 1.5)
    }

    pub fn with_multiplier(lineup_len: usize, captain_multiplier: f32) -> Self {
        let mut coefficients = vec![1.0; lineup_len];
        if let Some(first) = coefficients.first_mut() {
            *first = captain_multiplier;
        }
        CaptainFitness { coefficients }
    }

    pub fn from_coefficients(coefficients: Vec<f32>) -> Self {
        CaptainFitness { coefficients }
    }

    pub fn coefficients(&self) -> &[f32] {
        &self.coefficients
    }
}

impl Fitness for CaptainFitness {
    #[inline]
    fn score_row(&self, row: &[PlayerId], pool: &PlayerPool) -> f32 {
        row.iter()
            .zip(&self.coefficients)
            .map(|(&id, &coef)| pool.points(id) * coef)
            .sum()
    }
}
