use std::collections::VecDeque;

use crate::config::Rgb;
use crate::grid::{Cell, Grid, Tile};
use crate::input::{Direction, direction_change_is_valid};
use crate::occupancy::OccupancySet;

/// Result of one [`Snake::advance`] call.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Movement {
    /// The head moved to a free cell.
    Moved,
    /// The head would have entered the body; the snake has been reset.
    SelfCollision,
}

/// Mutable snake state: body, heading, growth target and the queued turn.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    length: usize,
    direction: Direction,
    pending_direction: Option<Direction>,
    /// Tail cell given up by the latest advance, reclaimed if the snake grows
    /// before moving again.
    vacated: Option<Cell>,
    home: Cell,
    home_direction: Direction,
    color: Rgb,
}

impl Snake {
    /// Creates a one-cell snake at `home`; resets return it there facing `direction`.
    #[must_use]
    pub fn new(home: Cell, direction: Direction, color: Rgb) -> Self {
        Self {
            body: VecDeque::from([home]),
            length: 1,
            direction,
            pending_direction: None,
            vacated: None,
            home,
            home_direction: direction,
            color,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// The growth target equals the segment count; `home` is where resets
    /// put the snake back.
    #[must_use]
    pub fn from_segments(
        segments: Vec<Cell>,
        direction: Direction,
        home: Cell,
        color: Rgb,
    ) -> Self {
        let mut snake = Self::new(home, direction, color);
        if !segments.is_empty() {
            snake.length = segments.len();
            snake.body = VecDeque::from(segments);
        }
        snake
    }

    /// Queues a turn for the next advance.
    ///
    /// Ignored when it would reverse a multi-cell snake into its own neck,
    /// or when a turn is already queued for this tick.
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.accepts_turn(direction) {
            return;
        }

        if self.pending_direction.is_none() {
            self.pending_direction = Some(direction);
        }
    }

    /// Returns false for a turn that would reverse a multi-cell snake.
    #[must_use]
    pub fn accepts_turn(&self, direction: Direction) -> bool {
        self.length <= 1 || direction_change_is_valid(self.direction, direction)
    }

    /// Applies the queued turn and moves one cell on the torus.
    pub fn advance(&mut self, grid: Grid) -> Movement {
        if let Some(next) = self.pending_direction.take() {
            self.direction = next;
        }

        let next_head = grid.wrap(self.head(), self.direction);

        // The neck is always vacated by the move, so only segments past it count.
        if self.body.iter().skip(2).any(|segment| *segment == next_head) {
            self.reset();
            return Movement::SelfCollision;
        }

        self.body.push_front(next_head);
        self.vacated = None;
        while self.body.len() > self.length {
            self.vacated = self.body.pop_back();
        }

        Movement::Moved
    }

    /// Raises the growth target by one cell.
    ///
    /// If the latest advance just released its tail, that cell is kept so the
    /// body reaches the new length immediately; otherwise the next advance
    /// keeps its tail instead.
    pub fn grow(&mut self) {
        self.length += 1;

        if self.body.len() < self.length {
            if let Some(tail) = self.vacated.take() {
                self.body.push_back(tail);
            }
        }
    }

    /// Returns the snake to a single cell at its home position.
    pub fn reset(&mut self) {
        self.body.clear();
        self.body.push_front(self.home);
        self.length = 1;
        self.direction = self.home_direction;
        self.pending_direction = None;
        self.vacated = None;
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Snapshot of the cells covered by the body.
    #[must_use]
    pub fn occupied_cells(&self) -> OccupancySet {
        self.body.iter().copied().collect()
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Target body size, including growth not yet realised.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    #[must_use]
    pub fn home(&self) -> Cell {
        self.home
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    /// Body segments from head to tail, tagged with the snake's color.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.body.iter().map(|&cell| Tile {
            cell,
            color: self.color,
        })
    }
}
