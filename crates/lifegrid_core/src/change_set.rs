//! Per-generation deltas
//!
//! A [`ChangeSet`] holds exactly the cells whose state flipped in the most
//! recent tick. The caller owns it and hands it back to every tick so the
//! backing buffers are allocated once.

use crate::Cell;

/// A single state flip reported by a tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellChange {
    Birth(Cell),
    Death(Cell),
}

impl CellChange {
    #[inline]
    pub fn cell(&self) -> Cell {
        match *self {
            CellChange::Birth(cell) | CellChange::Death(cell) => cell,
        }
    }

    /// State of the cell after the change
    #[inline]
    pub fn is_alive(&self) -> bool {
        matches!(self, CellChange::Birth(_))
    }
}

/// Births and deaths of one generation, in insertion order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    births: Vec<Cell>,
    deaths: Vec<Cell>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size both lists; `cells` (the grid area) is always enough.
    pub fn with_capacity(cells: usize) -> Self {
        Self {
            births: Vec::with_capacity(cells),
            deaths: Vec::with_capacity(cells),
        }
    }

    /// Empty both lists, keeping their allocations
    pub fn clear(&mut self) {
        self.births.clear();
        self.deaths.clear();
    }

    #[inline]
    pub fn push_birth(&mut self, cell: Cell) {
        self.births.push(cell);
    }

    #[inline]
    pub fn push_death(&mut self, cell: Cell) {
        self.deaths.push(cell);
    }

    pub fn births(&self) -> &[Cell] {
        &self.births
    }

    pub fn deaths(&self) -> &[Cell] {
        &self.deaths
    }

    /// Total number of changed cells
    pub fn len(&self) -> usize {
        self.births.len() + self.deaths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.births.is_empty() && self.deaths.is_empty()
    }

    /// All changes: births first, then deaths
    pub fn iter(&self) -> impl Iterator<Item = CellChange> + '_ {
        self.births
            .iter()
            .map(|&c| CellChange::Birth(c))
            .chain(self.deaths.iter().map(|&c| CellChange::Death(c)))
    }
}
