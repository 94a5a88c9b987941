use rand::Rng;
use tracing::{debug, warn};

use crate::config::Rgb;
use crate::grid::{Cell, Grid, Tile};
use crate::occupancy::OccupancySet;

/// The single target on the board. Relocated, never recreated, when eaten.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Apple {
    tile: Tile,
}

impl Apple {
    /// Creates an apple at `position`.
    #[must_use]
    pub fn new(position: Cell, color: Rgb) -> Self {
        Self {
            tile: Tile {
                cell: position,
                color,
            },
        }
    }

    /// Creates an apple on a random cell outside `forbidden`.
    ///
    /// Falls back to the first grid cell when the board is full, which only a
    /// degenerate configuration can produce.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        grid: Grid,
        forbidden: &OccupancySet,
        color: Rgb,
    ) -> Self {
        let position = place(rng, grid, forbidden).unwrap_or_else(|| grid.cell_at(0, 0));
        Self::new(position, color)
    }

    #[must_use]
    pub fn position(&self) -> Cell {
        self.tile.cell
    }

    #[must_use]
    pub fn tile(&self) -> Tile {
        self.tile
    }

    /// Moves the apple to a random free cell.
    ///
    /// Returns `false` and keeps the previous position when every cell is
    /// forbidden.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: Grid,
        forbidden: &OccupancySet,
    ) -> bool {
        match place(rng, grid, forbidden) {
            Some(position) => {
                debug!(from = ?self.tile.cell, to = ?position, "apple relocated");
                self.tile.cell = position;
                true
            }
            None => {
                warn!(at = ?self.tile.cell, "no free cell for apple; keeping position");
                false
            }
        }
    }
}

/// Picks a cell uniformly from the grid cells not in `forbidden`.
///
/// Returns `None` when the board is fully occupied.
#[must_use]
pub fn place<R: Rng + ?Sized>(rng: &mut R, grid: Grid, forbidden: &OccupancySet) -> Option<Cell> {
    let candidates: Vec<Cell> = forbidden.free_cells(grid).collect();

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
