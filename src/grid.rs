use serde::Serialize;

use crate::config::{MAX_EXTENT, Rgb};
use crate::input::Direction;

/// Grid position in world units; always a multiple of the cell size.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Position plus display color: the shape every drawable entity carries.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct Tile {
    pub cell: Cell,
    pub color: Rgb,
}

/// Toroidal coordinate space: world extents plus the cell size that tiles them.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    width: i32,
    height: i32,
    cell_size: i32,
}

impl Grid {
    /// Creates a grid. Callers go through `GameConfig::validate`, which
    /// guarantees non-zero extents of at most `MAX_EXTENT` that are
    /// multiples of `cell_size`.
    #[must_use]
    pub(crate) fn new(width: u32, height: u32, cell_size: u32) -> Self {
        debug_assert!(cell_size > 0 && width % cell_size == 0 && height % cell_size == 0);
        debug_assert!(width <= MAX_EXTENT && height <= MAX_EXTENT);

        Self {
            width: to_i32(width),
            height: to_i32(height),
            cell_size: to_i32(cell_size),
        }
    }

    #[must_use]
    pub fn columns(self) -> i32 {
        self.width / self.cell_size
    }

    #[must_use]
    pub fn rows(self) -> i32 {
        self.height / self.cell_size
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        let columns = usize::try_from(self.columns()).unwrap_or(0);
        let rows = usize::try_from(self.rows()).unwrap_or(0);
        columns.saturating_mul(rows)
    }

    /// Converts a column/row index to the cell's world position, wrapping out-of-range indices.
    #[must_use]
    pub fn cell_at(self, column: i32, row: i32) -> Cell {
        Cell {
            x: column.rem_euclid(self.columns()) * self.cell_size,
            y: row.rem_euclid(self.rows()) * self.cell_size,
        }
    }

    /// Returns the column/row index of `cell`.
    #[must_use]
    pub fn index_of(self, cell: Cell) -> (i32, i32) {
        (cell.x / self.cell_size, cell.y / self.cell_size)
    }

    /// Cell at the middle of the board, rounded down to the grid.
    #[must_use]
    pub fn center(self) -> Cell {
        self.cell_at(self.columns() / 2, self.rows() / 2)
    }

    /// Returns true when `cell` is aligned to the grid and inside the board.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < self.width
            && cell.y < self.height
            && cell.x % self.cell_size == 0
            && cell.y % self.cell_size == 0
    }

    /// Moves `cell` one step in `direction`, re-entering at the opposite edge.
    #[must_use]
    pub fn wrap(self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell {
            x: (cell.x + dx * self.cell_size).rem_euclid(self.width),
            y: (cell.y + dy * self.cell_size).rem_euclid(self.height),
        }
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let (columns, rows) = (self.columns(), self.rows());
        (0..rows).flat_map(move |row| (0..columns).map(move |column| self.cell_at(column, row)))
    }
}

fn to_i32(value: u32) -> i32 {
    // Lossless: validated extents never exceed `MAX_EXTENT`.
    i32::try_from(value.min(MAX_EXTENT)).unwrap_or(i32::MAX)
}
