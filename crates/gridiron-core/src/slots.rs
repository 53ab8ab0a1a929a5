use crate::position::Position;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered `position -> slot count` map. Insertion order is the
/// canonical slot order of every lineup the engine produces, so two
/// maps with the same counts but different ordering describe different
/// (but equivalent) layouts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionMap {
    entries: Vec<(Position, usize)>,
}

impl PositionMap {
    pub fn new() -> Self {
        PositionMap {
            entries: Vec::new(),
        }
    }

    /// The classic NFL layout: QB, RB x2, WR x3, TE, FLEX, DST.
    pub fn classic() -> Self {
        PositionMap::new()
            .with("QB", 1)
            .with("RB", 2)
            .with("WR", 3)
            .with("TE", 1)
            .with(Position::flex(), 1)
            .with("DST", 1)
    }

    pub fn with(mut self, position: impl Into<Position>, count: usize) -> Self {
        self.insert(position, count);
        self
    }

    /// Inserts or replaces the count for a position, preserving the
    /// position's original ordering slot when it already exists.
    pub fn insert(&mut self, position: impl Into<Position>, count: usize) {
        let position = position.into();
        match self.entries.iter_mut().find(|(p, _)| *p == position) {
            Some(entry) => entry.1 = count,
            None => self.entries.push((position, count)),
        }
    }

    pub fn count(&self, position: &Position) -> usize {
        self.entries
            .iter()
            .find(|(p, _)| p == position)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Position, usize)> {
        self.entries.iter().map(|(p, c)| (p, *c))
    }

    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.entries.iter().map(|(p, _)| p)
    }

    /// Total slots per lineup (`L`).
    pub fn lineup_len(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lineup_len() == 0
    }

    pub fn flex_slots(&self) -> usize {
        self.entries
            .iter()
            .filter(|(p, _)| p.is_flex())
            .map(|(_, c)| *c)
            .sum()
    }
}

impl Default for PositionMap {
    fn default() -> Self {
        PositionMap::classic()
    }
}

impl<P: Into<Position>> FromIterator<(P, usize)> for PositionMap {
    fn from_iter<I: IntoIterator<Item = (P, usize)>>(iter: I) -> Self {
        let mut map = PositionMap::new();
        for (position, count) in iter {
            map.insert(position, count);
        }
        map
    }
}

/// The expanded slot layout: one entry per lineup column, in canonical
/// order. Slot `c` of every lineup in a population holds an id drawn
/// from slot `c`'s position view, which is what lets crossover blend
/// columns without re-checking position structure.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotLayout {
    slots: Vec<Position>,
}

impl SlotLayout {
    pub fn from_map(map: &PositionMap) -> Self {
        let mut slots = Vec::with_capacity(map.lineup_len());
        for (position, count) in map.iter() {
            for _ in 0..count {
                slots.push(position.clone());
            }
        }
        SlotLayout { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn position(&self, slot: usize) -> &Position {
        &self.slots[slot]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.slots.iter()
    }

    pub fn flex_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_flex())
            .map(|(c, _)| c)
    }
}

impl From<&PositionMap> for SlotLayout {
    fn from(map: &PositionMap) -> Self {
        SlotLayout::from_map(map)
    }
}
