use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::apple::Apple;
use crate::config::{ConfigError, GameConfig};
use crate::grid::Grid;
use crate::input::{Direction, GameInput};
use crate::obstacles::ObstacleField;
use crate::occupancy::OccupancySet;
use crate::snake::{Movement, Snake};
use crate::snapshot::Snapshot;

/// Why the snake was sent back to its home cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ResetCause {
    SelfCollision,
    Obstacle,
}

/// What happened during one [`GameState::tick`].
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TickOutcome {
    pub ate_apple: bool,
    pub reset: Option<ResetCause>,
    pub obstacles_regenerated: bool,
}

/// Counters kept for the lifetime of one session. Never persisted.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct SessionStats {
    pub self_collisions: u32,
    pub obstacle_collisions: u32,
    pub best_length: usize,
}

impl SessionStats {
    #[must_use]
    pub fn resets(&self) -> u32 {
        self.self_collisions + self.obstacle_collisions
    }
}

/// Complete mutable simulation state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub apple: Apple,
    pub obstacles: ObstacleField,
    pub tick_count: u64,
    pub stats: SessionStats,
    queued_direction: Option<Direction>,
    grid: Grid,
    rng: StdRng,
}

impl GameState {
    /// Creates a state seeded from OS entropy.
    pub fn new(config: &GameConfig, now: Instant) -> Result<Self, ConfigError> {
        Self::new_with_seed(config, rand::random(), now)
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    ///
    /// The snake starts as a single cell in the middle of the board heading
    /// right; resets return it there.
    pub fn new_with_seed(
        config: &GameConfig,
        seed: u64,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        let grid = config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let palette = config.palette;

        let snake = Snake::new(grid.center(), Direction::Right, palette.snake);
        let apple = Apple::spawn(&mut rng, grid, &snake.occupied_cells(), palette.apple);

        let forbidden = snake
            .occupied_cells()
            .with([apple.position(), snake.home()]);
        let obstacles = ObstacleField::new(
            &mut rng,
            grid,
            config.obstacle_count,
            config.obstacle_interval,
            &forbidden,
            palette.obstacle,
            now,
        );

        info!(seed, columns = grid.columns(), rows = grid.rows(), "session started");

        Ok(Self {
            snake,
            apple,
            obstacles,
            tick_count: 0,
            stats: SessionStats {
                best_length: 1,
                ..SessionStats::default()
            },
            queued_direction: None,
            grid,
            rng,
        })
    }

    /// Applies one external input event.
    ///
    /// Direction requests are held until the next tick; a later request
    /// before that tick replaces an earlier one. A reversal the snake would
    /// refuse is dropped here, so it never displaces a queued turn. `Quit` is
    /// the front end's business and is ignored here.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) if self.snake.accepts_turn(direction) => {
                self.queued_direction = Some(direction);
            }
            GameInput::Direction(_) | GameInput::Quit => {}
        }
    }

    /// Advances the simulation by one tick, using `now` for obstacle timing.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        self.tick_count += 1;

        if let Some(direction) = self.queued_direction.take() {
            self.snake.set_direction(direction);
        }

        let length_before = self.snake.length();
        if self.snake.advance(self.grid) == Movement::SelfCollision {
            self.record_reset(ResetCause::SelfCollision, length_before);
            outcome.reset = Some(ResetCause::SelfCollision);
        }

        let head = self.snake.head();
        if head == self.apple.position() {
            self.snake.grow();
            let forbidden = self
                .snake
                .occupied_cells()
                .with(self.obstacles.cells())
                .with([self.snake.home()]);
            self.apple.relocate(&mut self.rng, self.grid, &forbidden);
            self.stats.best_length = self.stats.best_length.max(self.snake.length());
            outcome.ate_apple = true;
        }

        if self.obstacles.contains(self.snake.head()) {
            let length_before = self.snake.length();
            self.snake.reset();
            self.record_reset(ResetCause::Obstacle, length_before);
            outcome.reset = Some(ResetCause::Obstacle);
        }

        if self.obstacles.is_due(now) {
            let forbidden = self.occupancy_with_apple_and_home();
            self.obstacles.refresh(&mut self.rng, self.grid, &forbidden, now);
            outcome.obstacles_regenerated = true;
        }

        outcome
    }

    /// Builds the read-only view the renderer draws from.
    #[must_use]
    pub fn snapshot(&self, now: Instant) -> Snapshot {
        let refresh_in = self.obstacles.time_until_regeneration(now);

        Snapshot {
            tick: self.tick_count,
            length: self.snake.length(),
            best_length: self.stats.best_length,
            resets: self.stats.resets(),
            direction: self.snake.direction(),
            snake: self.snake.tiles().collect(),
            apple: self.apple.tile(),
            obstacles: self.obstacles.tiles().collect(),
            obstacles_refresh_in_ms: u64::try_from(refresh_in.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Returns the grid the session runs on.
    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    fn occupancy_with_apple_and_home(&self) -> OccupancySet {
        self.snake
            .occupied_cells()
            .with([self.apple.position(), self.snake.home()])
    }

    fn record_reset(&mut self, cause: ResetCause, lost_length: usize) {
        match cause {
            ResetCause::SelfCollision => self.stats.self_collisions += 1,
            ResetCause::Obstacle => self.stats.obstacle_collisions += 1,
        }
        info!(?cause, lost_length, tick = self.tick_count, "snake reset");
    }
}
