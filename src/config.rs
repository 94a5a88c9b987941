use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::grid::Grid;

/// Default world width in world units.
pub const DEFAULT_WIDTH: u32 = 640;

/// Default world height in world units.
pub const DEFAULT_HEIGHT: u32 = 480;

/// Default edge length of one grid cell in world units.
pub const DEFAULT_CELL_SIZE: u32 = 20;

/// Default tick interval in milliseconds (10 ticks per second).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Number of obstacle cells kept on the board.
pub const DEFAULT_OBSTACLE_COUNT: usize = 10;

/// Seconds between obstacle regenerations.
pub const DEFAULT_OBSTACLE_INTERVAL_SECS: u64 = 30;

/// Largest accepted world extent; keeps one-step moves inside `i32`.
pub const MAX_EXTENT: u32 = 1 << 30;

/// 24-bit display color attached to every drawable entity.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Colors handed to the renderer alongside entity positions.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Palette {
    pub snake: Rgb,
    pub apple: Rgb,
    pub obstacle: Rgb,
    pub board: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            snake: Rgb::new(0, 255, 0),
            apple: Rgb::new(255, 0, 0),
            obstacle: Rgb::new(128, 128, 128),
            board: Rgb::new(0, 0, 0),
        }
    }
}

/// Reasons a [`GameConfig`] cannot produce a playable board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("cell size must be non-zero")]
    ZeroCellSize,
    #[error("world extent {extent} is not a multiple of cell size {cell_size}")]
    MisalignedExtent { extent: u32, cell_size: u32 },
    #[error("world extent {extent} exceeds the maximum of {max}")]
    ExtentTooLarge { extent: u32, max: u32 },
    #[error("board must be at least 2x2 cells, got {columns}x{rows}")]
    BoardTooSmall { columns: u32, rows: u32 },
    #[error("{count} obstacles leave no free cell on a board of {cells} cells")]
    TooManyObstacles { count: usize, cells: usize },
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,
}

/// Session configuration, built once at startup and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// World width in world units.
    pub width: u32,
    /// World height in world units.
    pub height: u32,
    /// Edge length of one cell in world units.
    pub cell_size: u32,
    pub tick_interval: Duration,
    pub obstacle_count: usize,
    /// Wall-clock time between obstacle regenerations.
    pub obstacle_interval: Duration,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            obstacle_count: DEFAULT_OBSTACLE_COUNT,
            obstacle_interval: Duration::from_secs(DEFAULT_OBSTACLE_INTERVAL_SECS),
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    /// Builds a config for a board of `columns` x `rows` cells, keeping other defaults.
    #[must_use]
    pub fn with_cells(columns: u32, rows: u32) -> Self {
        Self {
            width: columns * DEFAULT_CELL_SIZE,
            height: rows * DEFAULT_CELL_SIZE,
            ..Self::default()
        }
    }

    /// Checks the configuration and returns the grid it describes.
    pub fn validate(&self) -> Result<Grid, ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        for extent in [self.width, self.height] {
            if extent > MAX_EXTENT {
                return Err(ConfigError::ExtentTooLarge {
                    extent,
                    max: MAX_EXTENT,
                });
            }
            if extent % self.cell_size != 0 {
                return Err(ConfigError::MisalignedExtent {
                    extent,
                    cell_size: self.cell_size,
                });
            }
        }

        let columns = self.width / self.cell_size;
        let rows = self.height / self.cell_size;
        // A single row or column lets a wrapping snake run onto its own head.
        if columns < 2 || rows < 2 {
            return Err(ConfigError::BoardTooSmall { columns, rows });
        }

        let grid = Grid::new(self.width, self.height, self.cell_size);

        // Snake and apple each need one cell besides the obstacles.
        let needed = self.obstacle_count.checked_add(2);
        if needed.is_none_or(|needed| needed > grid.total_cells()) {
            return Err(ConfigError::TooManyObstacles {
                count: self.obstacle_count,
                cells: grid.total_cells(),
            });
        }

        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }

        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{ConfigError, GameConfig, MAX_EXTENT};

    #[test]
    fn default_config_describes_32_by_24_board() {
        let grid = GameConfig::default()
            .validate()
            .expect("default config should be valid");

        assert_eq!(grid.columns(), 32);
        assert_eq!(grid.rows(), 24);
    }

    #[test]
    fn misaligned_extent_is_rejected() {
        let config = GameConfig {
            width: 650,
            ..GameConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::MisalignedExtent {
                extent: 650,
                cell_size: 20
            })
        );
    }

    #[test]
    fn zero_cell_size_is_rejected() {
        let config = GameConfig {
            cell_size: 0,
            ..GameConfig::default()
        };

        assert_eq!(config.validate(), Err(ConfigError::ZeroCellSize));
    }

    #[test]
    fn obstacle_count_must_leave_room_for_snake_and_apple() {
        let config = GameConfig {
            obstacle_count: 3,
            ..GameConfig::with_cells(2, 2)
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyObstacles { count: 3, cells: 4 })
        );
    }

    #[test]
    fn huge_obstacle_count_is_rejected_without_overflow() {
        let config = GameConfig {
            obstacle_count: usize::MAX,
            ..GameConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyObstacles {
                count: usize::MAX,
                cells: 768
            })
        );
    }

    #[test]
    fn single_column_board_is_rejected() {
        let config = GameConfig {
            obstacle_count: 0,
            ..GameConfig::with_cells(1, 24)
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::BoardTooSmall {
                columns: 1,
                rows: 24
            })
        );
    }

    #[test]
    fn oversized_extent_is_rejected() {
        let config = GameConfig {
            width: u32::MAX - u32::MAX % 20,
            ..GameConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::ExtentTooLarge {
                extent: u32::MAX - u32::MAX % 20,
                max: MAX_EXTENT
            })
        );
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let config = GameConfig {
            tick_interval: Duration::ZERO,
            ..GameConfig::default()
        };

        assert_eq!(config.validate(), Err(ConfigError::ZeroTickInterval));
    }
}
