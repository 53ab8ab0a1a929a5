use crate::pool::PlayerId;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A population of lineups as one flat `[rows x cols]` integer matrix.
/// Row `r` is a lineup; column `c` is a slot in the canonical layout.
/// Operators work on row slices, so the matrix never reallocates per
/// lineup and fitness/salary passes are contiguous scans.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineupMatrix {
    data: Vec<PlayerId>,
    cols: usize,
}

impl LineupMatrix {
    pub fn new(cols: usize) -> Self {
        LineupMatrix {
            data: Vec::new(),
            cols,
        }
    }

    pub fn with_capacity(rows: usize, cols: usize) -> Self {
        LineupMatrix {
            data: Vec::with_capacity(rows * cols),
            cols,
        }
    }

    pub fn from_vec(data: Vec<PlayerId>, cols: usize) -> Self {
        debug_assert!(cols > 0 && data.len() % cols == 0);
        LineupMatrix { data, cols }
    }

    pub fn rows(&self) -> usize {
        if self.cols == 0 { 0 } else { self.data.len() / self.cols }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn row(&self, r: usize) -> &[PlayerId] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    #[inline]
    pub fn row_mut(&mut self, r: usize) -> &mut [PlayerId] {
        &mut self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn push_row(&mut self, row: &[PlayerId]) {
        debug_assert_eq!(row.len(), self.cols);
        self.data.extend_from_slice(row);
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[PlayerId]> {
        self.data.chunks_exact(self.cols)
    }

    pub fn iter_rows_mut(&mut self) -> impl Iterator<Item = &mut [PlayerId]> {
        self.data.chunks_exact_mut(self.cols)
    }

    pub fn as_slice(&self) -> &[PlayerId] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [PlayerId] {
        &mut self.data
    }

    /// Keeps only the rows flagged true, compacting in place.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        debug_assert_eq!(keep.len(), self.rows());

        let cols = self.cols;
        let mut write = 0;
        for (r, &kept) in keep.iter().enumerate() {
            if kept {
                if write != r {
                    self.data.copy_within(r * cols..(r + 1) * cols, write * cols);
                }
                write += 1;
            }
        }
        self.data.truncate(write * cols);
    }

    /// Appends every row of `other`. Shapes must agree.
    pub fn extend_from(&mut self, other: &LineupMatrix) {
        debug_assert_eq!(self.cols, other.cols);
        self.data.extend_from_slice(&other.data);
    }

    pub fn truncate_rows(&mut self, rows: usize) {
        self.data.truncate(rows * self.cols);
    }

    /// Copies the given rows (in the given order) into a new matrix.
    pub fn select_rows(&self, indexes: &[usize]) -> LineupMatrix {
        let mut selected = LineupMatrix::with_capacity(indexes.len(), self.cols);
        for &r in indexes {
            selected.push_row(self.row(r));
        }
        selected
    }

    /// The row's ids in sorted order; two lineups are the same lineup
    /// iff their sorted keys are equal, regardless of slot assignment.
    pub fn sorted_row_key(&self, r: usize) -> Vec<PlayerId> {
        let mut key = self.row(r).to_vec();
        key.sort_unstable();
        key
    }
}

impl Index<usize> for LineupMatrix {
    type Output = [PlayerId];

    fn index(&self, r: usize) -> &Self::Output {
        self.row(r)
    }
}

impl FromIterator<Vec<PlayerId>> for LineupMatrix {
    fn from_iter<I: IntoIterator<Item = Vec<PlayerId>>>(iter: I) -> Self {
        let mut rows = iter.into_iter();
        match rows.next() {
            Some(first) => {
                let cols = first.len();
                let mut matrix = LineupMatrix { data: first, cols };
                for row in rows {
                    matrix.push_row(&row);
                }
                matrix
            }
            None => LineupMatrix::new(0),
        }
    }
}
