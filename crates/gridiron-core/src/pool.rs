use crate::position::Position;
use gridiron_error::{GridironResult, gridiron_bail};
use std::ops::Range;

/// Canonical player identifier: the row index of the player in the
/// built [PlayerPool], dense in `[0, P)` and stable for the run.
pub type PlayerId = u32;

/// One typed input row. The ingest layer (CSV parsing, column mapping,
/// schema detection) lives outside this crate; by the time rows reach
/// the pool they are already typed.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerRow {
    pub name: String,
    pub team: Option<String>,
    pub position: Position,
    pub salary: u32,
    pub points: f32,
}

impl PlayerRow {
    pub fn new(name: impl Into<String>, position: impl Into<Position>, salary: u32, points: f32) -> Self {
        PlayerRow {
            name: name.into(),
            team: None,
            position: position.into(),
            salary,
            points,
        }
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    fn is_well_formed(&self, allowed: &[Position]) -> bool {
        !self.name.is_empty()
            && self.points.is_finite()
            && self.points >= 0.0
            && allowed.contains(&self.position)
    }
}

/// The immutable table of players under optimization, sorted by
/// position so each position occupies a contiguous id range. Column
/// storage keeps the hot lookups (salary, points, position by id) as
/// plain indexed loads.
#[derive(Clone, Debug)]
pub struct PlayerPool {
    names: Vec<String>,
    teams: Vec<Option<String>>,
    positions: Vec<Position>,
    salaries: Vec<u32>,
    points: Vec<f32>,
    groups: Vec<(Position, Range<usize>)>,
    dropped_rows: usize,
}

impl PlayerPool {
    /// Builds the pool from typed rows. Rows that are malformed
    /// (empty name, non-finite or negative points, position outside
    /// `allowed`) are dropped and counted rather than failing the
    /// build; an empty surviving table is a data error.
    pub fn from_rows(
        rows: impl IntoIterator<Item = PlayerRow>,
        allowed: &[Position],
    ) -> GridironResult<Self> {
        let mut rows = rows.into_iter().collect::<Vec<PlayerRow>>();
        let before = rows.len();
        rows.retain(|row| row.is_well_formed(allowed));
        let dropped_rows = before - rows.len();

        if rows.is_empty() {
            gridiron_bail!(Data: "no well-formed player rows remain ({} dropped)", dropped_rows);
        }

        // stable by position so equal-position rows keep source order
        rows.sort_by(|a, b| a.position.cmp(&b.position));

        let mut pool = PlayerPool {
            names: Vec::with_capacity(rows.len()),
            teams: Vec::with_capacity(rows.len()),
            positions: Vec::with_capacity(rows.len()),
            salaries: Vec::with_capacity(rows.len()),
            points: Vec::with_capacity(rows.len()),
            groups: Vec::new(),
            dropped_rows,
        };

        for row in rows {
            pool.names.push(row.name);
            pool.teams.push(row.team);
            pool.positions.push(row.position);
            pool.salaries.push(row.salary);
            pool.points.push(row.points);
        }

        let mut start = 0;
        while start < pool.positions.len() {
            let position = pool.positions[start].clone();
            let mut end = start + 1;
            while end < pool.positions.len() && pool.positions[end] == position {
                end += 1;
            }
            pool.groups.push((position, start..end));
            start = end;
        }

        Ok(pool)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Count of malformed input rows discarded during the build.
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    pub fn name(&self, id: PlayerId) -> &str {
        &self.names[id as usize]
    }

    pub fn team(&self, id: PlayerId) -> Option<&str> {
        self.teams[id as usize].as_deref()
    }

    pub fn position(&self, id: PlayerId) -> &Position {
        &self.positions[id as usize]
    }

    pub fn salary(&self, id: PlayerId) -> u32 {
        self.salaries[id as usize]
    }

    pub fn points(&self, id: PlayerId) -> f32 {
        self.points[id as usize]
    }

    pub fn salaries(&self) -> &[u32] {
        &self.salaries
    }

    pub fn projected_points(&self) -> &[f32] {
        &self.points
    }

    /// The contiguous id range occupied by a position, if present.
    pub fn group(&self, position: &Position) -> Option<Range<usize>> {
        self.groups
            .iter()
            .find(|(p, _)| p == position)
            .map(|(_, range)| range.clone())
    }

    pub fn positions_present(&self) -> impl Iterator<Item = &Position> {
        self.groups.iter().map(|(p, _)| p)
    }

    pub fn lineup_salary(&self, row: &[PlayerId]) -> u64 {
        row.iter().map(|&id| self.salaries[id as usize] as u64).sum()
    }

    pub fn lineup_points(&self, row: &[PlayerId]) -> f32 {
        row.iter().map(|&id| self.points[id as usize]).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<Position> {
        vec![Position::new("QB"), Position::new("RB"), Position::new("WR")]
    }

    #[test]
    fn groups_are_contiguous_and_sorted() {
        let rows = vec![
            PlayerRow::new("a", "WR", 100, 10.0),
            PlayerRow::new("b", "QB", 200, 20.0),
            PlayerRow::new("c", "WR", 150, 12.0),
            PlayerRow::new("d", "RB", 120, 9.0),
        ];

        let pool = PlayerPool::from_rows(rows, &allowed()).unwrap();

        let qb = pool.group(&Position::new("QB")).unwrap();
        let wr = pool.group(&Position::new("WR")).unwrap();
        assert_eq!(qb.len(), 1);
        assert_eq!(wr.len(), 2);

        for id in wr {
            assert_eq!(pool.position(id as PlayerId), &Position::new("WR"));
        }
    }

    #[test]
    fn malformed_rows_are_dropped() {
        let rows = vec![
            PlayerRow::new("ok", "QB", 100, 10.0),
            PlayerRow::new("", "QB", 100, 10.0),
            PlayerRow::new("nan", "QB", 100, f32::NAN),
            PlayerRow::new("kicker", "K", 100, 8.0), // not an allowed position
        ];

        let pool = PlayerPool::from_rows(rows, &allowed()).unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.dropped_rows(), 3);
    }

    #[test]
    fn all_rows_malformed_is_a_data_error() {
        let rows = vec![PlayerRow::new("", "QB", 100, 10.0)];
        assert!(PlayerPool::from_rows(rows, &allowed()).is_err());
    }

    #[test]
    fn lineup_sums() {
        let rows = vec![
            PlayerRow::new("a", "QB", 100, 10.0),
            PlayerRow::new("b", "RB", 200, 20.0),
        ];
        let pool = PlayerPool::from_rows(rows, &allowed()).unwrap();

        assert_eq!(pool.lineup_salary(&[0, 1]), 300);
        assert_eq!(pool.lineup_points(&[0, 1]), 30.0);
    }
}
