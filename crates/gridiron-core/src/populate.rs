use crate::matrix::LineupMatrix;
use crate::position_pool::SlotViews;

/// Builds an initial population of `count` lineups by drawing every
/// slot independently from its position view's points-per-dollar
/// distribution. The result satisfies slot structure by construction;
/// salary and duplicate constraints are the validators' job.
pub fn populate(slots: &SlotViews<'_>, count: usize) -> LineupMatrix {
    let cols = slots.len();
    let mut matrix = LineupMatrix::from_vec(vec![0; count * cols], cols);

    for c in 0..cols {
        let view = slots.view(c);
        let data = matrix.as_mut_slice();
        for r in 0..count {
            data[r * cols + c] = view.sample();
        }
    }

    matrix
}
