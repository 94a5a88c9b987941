use serde::Serialize;

use crate::grid::Tile;
use crate::input::Direction;

/// Read-only view of one tick, handed to whichever front end draws it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    /// Target body size of the snake.
    pub length: usize,
    pub best_length: usize,
    pub resets: u32,
    pub direction: Direction,
    /// Body tiles from head to tail.
    pub snake: Vec<Tile>,
    pub apple: Tile,
    pub obstacles: Vec<Tile>,
    /// Milliseconds until the obstacle set is replaced.
    pub obstacles_refresh_in_ms: u64,
}

impl Snapshot {
    /// Head tile; `None` only for a hand-built snapshot with no body.
    #[must_use]
    pub fn head(&self) -> Option<&Tile> {
        self.snake.first()
    }
}
