use std::collections::HashSet;

use crate::grid::{Cell, Grid};

/// Cells currently claimed by one or more entities.
///
/// Built fresh whenever something needs placing and dropped right after; it
/// only ever acts as an exclusion filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancySet {
    cells: HashSet<Cell>,
}

impl OccupancySet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every cell from `cells`, returning the set for chaining.
    #[must_use]
    pub fn with<I>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        self.extend(cells);
        self
    }

    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over the cells of `grid` not in this set, in row-major order.
    pub fn free_cells(&self, grid: Grid) -> impl Iterator<Item = Cell> + '_ {
        grid.cells().filter(|cell| !self.cells.contains(cell))
    }
}

impl Extend<Cell> for OccupancySet {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

impl FromIterator<Cell> for OccupancySet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
