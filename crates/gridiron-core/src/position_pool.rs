use crate::domain::random_provider;
use crate::pool::{PlayerId, PlayerPool};
use crate::position::Position;
use crate::slots::SlotLayout;
use gridiron_error::{GridironResult, gridiron_bail};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-position minimum projected points. Positions without an entry
/// default to no threshold.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionFilter {
    thresholds: Vec<(Position, f32)>,
}

impl PositionFilter {
    pub fn new() -> Self {
        PositionFilter::default()
    }

    pub fn with(mut self, position: impl Into<Position>, min_points: f32) -> Self {
        self.thresholds.push((position.into(), min_points));
        self
    }

    pub fn min_points(&self, position: &Position) -> f32 {
        self.thresholds
            .iter()
            .find(|(p, _)| p == position)
            .map(|(_, t)| *t)
            .unwrap_or(0.0)
    }
}

impl<P: Into<Position>> FromIterator<(P, f32)> for PositionFilter {
    fn from_iter<I: IntoIterator<Item = (P, f32)>>(iter: I) -> Self {
        PositionFilter {
            thresholds: iter.into_iter().map(|(p, t)| (p.into(), t)).collect(),
        }
    }
}

/// A sampling view over one position (or over the FLEX union): the
/// canonical ids of the eligible players together with a categorical
/// distribution where probability is proportional to points per
/// dollar. Sampling is a uniform draw against the precomputed
/// cumulative distribution.
#[derive(Clone, Debug)]
pub struct PositionView {
    position: Position,
    ids: Vec<PlayerId>,
    salaries: Vec<u32>,
    points: Vec<f32>,
    probs: Vec<f32>,
    cdf: Vec<f32>,
}

impl PositionView {
    fn build(position: Position, members: Vec<PlayerId>, pool: &PlayerPool, min_points: f32) -> Option<Self> {
        let mut ids = Vec::with_capacity(members.len());
        let mut salaries = Vec::with_capacity(members.len());
        let mut points = Vec::with_capacity(members.len());
        let mut weights = Vec::with_capacity(members.len());

        for id in members {
            let salary = pool.salary(id);
            let projected = pool.points(id);
            // zero salary has undefined points-per-dollar; zero weight
            // would never be sampled anyway
            if salary == 0 || projected <= 0.0 || projected < min_points {
                continue;
            }

            ids.push(id);
            salaries.push(salary);
            points.push(projected);
            weights.push(projected / salary as f32);
        }

        let total: f32 = weights.iter().sum();
        if ids.is_empty() || total <= 0.0 {
            return None;
        }

        let mut probs = Vec::with_capacity(weights.len());
        let mut cdf = Vec::with_capacity(weights.len());
        let mut running = 0.0;
        for weight in &weights {
            let prob = weight / total;
            running += prob;
            probs.push(prob);
            cdf.push(running);
        }

        if let Some(last) = cdf.last_mut() {
            *last = 1.0;
        }

        Some(PositionView {
            position,
            ids,
            salaries,
            points,
            probs,
            cdf,
        })
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[PlayerId] {
        &self.ids
    }

    pub fn salaries(&self) -> &[u32] {
        &self.salaries
    }

    pub fn points(&self) -> &[f32] {
        &self.points
    }

    pub fn probs(&self) -> &[f32] {
        &self.probs
    }

    /// Draws one id, weighted by points per dollar.
    #[inline]
    pub fn sample(&self) -> PlayerId {
        self.ids[random_provider::cdf_index(&self.cdf)]
    }

    /// Draws `count` ids independently, with replacement.
    pub fn sample_many(&self, count: usize) -> Vec<PlayerId> {
        (0..count).map(|_| self.sample()).collect()
    }
}

/// The per-position views derived from a [PlayerPool], plus the
/// synthetic FLEX view (the union of the FLEX-eligible positions'
/// views, renormalized). Immutable once built.
#[derive(Clone, Debug)]
pub struct PositionPool {
    views: Vec<PositionView>,
    flex: Option<PositionView>,
}

impl PositionPool {
    pub fn new(
        pool: &PlayerPool,
        filter: &PositionFilter,
        flex_positions: &[Position],
    ) -> GridironResult<Self> {
        let mut views = Vec::new();
        for position in pool.positions_present() {
            let range = pool.group(position).unwrap_or(0..0);
            let members = range.map(|id| id as PlayerId).collect::<Vec<_>>();
            if let Some(view) =
                PositionView::build(position.clone(), members, pool, filter.min_points(position))
            {
                views.push(view);
            }
        }

        let flex = if flex_positions.is_empty() {
            None
        } else {
            let mut members = Vec::new();
            for position in flex_positions {
                if let Some(range) = pool.group(position) {
                    let min = filter.min_points(position);
                    members.extend(
                        range
                            .map(|id| id as PlayerId)
                            .filter(|&id| pool.points(id) >= min),
                    );
                }
            }
            PositionView::build(Position::flex(), members, pool, 0.0)
        };

        Ok(PositionPool { views, flex })
    }

    /// Resolves a slot position to its sampling view; FLEX resolves to
    /// the union view.
    pub fn view(&self, position: &Position) -> Option<&PositionView> {
        if position.is_flex() {
            self.flex.as_ref()
        } else {
            self.views.iter().find(|v| v.position() == position)
        }
    }

    pub fn flex_view(&self) -> Option<&PositionView> {
        self.flex.as_ref()
    }

    pub fn views(&self) -> &[PositionView] {
        &self.views
    }
}

/// The per-slot resolution of a [SlotLayout] against a [PositionPool]:
/// `slot c` maps to the view its ids are drawn from. Populate and
/// mutation both sample through this, which is what keeps slot
/// invariants intact across generations.
pub struct SlotViews<'a> {
    views: Vec<&'a PositionView>,
}

impl<'a> SlotViews<'a> {
    /// Fails with a config error when any slot's position has no
    /// non-empty view, since no valid lineup can then exist. This is
    /// where a thinned-out player table escalates to a fatal error.
    pub fn resolve(pool: &'a PositionPool, layout: &SlotLayout) -> GridironResult<Self> {
        let mut views = Vec::with_capacity(layout.len());
        for position in layout.iter() {
            match pool.view(position) {
                Some(view) if !view.is_empty() => views.push(view),
                _ => {
                    gridiron_bail!(InvalidConfig: "no eligible players for slot position {}", position)
                }
            }
        }

        Ok(SlotViews { views })
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    #[inline]
    pub fn view(&self, slot: usize) -> &PositionView {
        self.views[slot]
    }

    pub fn iter(&self) -> impl Iterator<Item = &&'a PositionView> {
        self.views.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::PlayerRow;
    use crate::slots::PositionMap;

    fn pool() -> PlayerPool {
        let allowed = vec![
            Position::new("QB"),
            Position::new("RB"),
            Position::new("WR"),
        ];
        PlayerPool::from_rows(
            vec![
                PlayerRow::new("q1", "QB", 100, 10.0),
                PlayerRow::new("q2", "QB", 200, 10.0),
                PlayerRow::new("q3", "QB", 0, 10.0),   // zero salary, excluded
                PlayerRow::new("q4", "QB", 100, 0.0),  // zero points, excluded
                PlayerRow::new("r1", "RB", 100, 5.0),
                PlayerRow::new("w1", "WR", 100, 8.0),
            ],
            &allowed,
        )
        .unwrap()
    }

    #[test]
    fn probabilities_are_points_per_dollar_normalized() {
        let pools = PositionPool::new(&pool(), &PositionFilter::new(), &[]).unwrap();
        let qb = pools.view(&Position::new("QB")).unwrap();

        // q1 at 10/100, q2 at 10/200; zero salary/points rows excluded
        assert_eq!(qb.len(), 2);
        let probs = qb.probs();
        assert!((probs.iter().sum::<f32>() - 1.0).abs() < 1e-6);
        assert!((probs[0] / probs[1] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn position_filter_removes_low_projections() {
        let filter = PositionFilter::new().with("QB", 10.5);
        let pools = PositionPool::new(&pool(), &filter, &[]).unwrap();

        assert!(pools.view(&Position::new("QB")).is_none());
    }

    #[test]
    fn flex_view_spans_eligible_positions() {
        let flex = vec![Position::new("RB"), Position::new("WR")];
        let pools = PositionPool::new(&pool(), &PositionFilter::new(), &flex).unwrap();
        let view = pools.flex_view().unwrap();

        assert_eq!(view.len(), 2);
        assert!((view.probs().iter().sum::<f32>() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn slot_views_fail_on_missing_position() {
        let pools = PositionPool::new(&pool(), &PositionFilter::new(), &[]).unwrap();
        let map = PositionMap::new().with("QB", 1).with("TE", 1);
        let layout = SlotLayout::from_map(&map);

        assert!(SlotViews::resolve(&pools, &layout).is_err());
    }

    #[test]
    fn samples_come_from_the_view() {
        let pools = PositionPool::new(&pool(), &PositionFilter::new(), &[]).unwrap();
        let qb = pools.view(&Position::new("QB")).unwrap();

        for _ in 0..100 {
            assert!(qb.ids().contains(&qb.sample()));
        }
    }
}
