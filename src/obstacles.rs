use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, warn};

use crate::config::Rgb;
use crate::grid::{Cell, Grid, Tile};
use crate::occupancy::OccupancySet;

/// Static hazard cells, replaced wholesale on a wall-clock interval.
#[derive(Debug, Clone)]
pub struct ObstacleField {
    cells: BTreeSet<Cell>,
    count: usize,
    interval: Duration,
    last_regenerated: Instant,
    color: Rgb,
}

impl ObstacleField {
    /// Generates the initial set of `count` obstacles outside `forbidden`.
    #[must_use]
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        grid: Grid,
        count: usize,
        interval: Duration,
        forbidden: &OccupancySet,
        color: Rgb,
        now: Instant,
    ) -> Self {
        Self {
            cells: regenerate(rng, grid, count, forbidden),
            count,
            interval,
            last_regenerated: now,
            color,
        }
    }

    /// Creates a field from explicit cells; the interval starts at `now`.
    #[must_use]
    pub fn with_cells<I>(cells: I, interval: Duration, color: Rgb, now: Instant) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        let cells: BTreeSet<Cell> = cells.into_iter().collect();
        Self {
            count: cells.len(),
            cells,
            interval,
            last_regenerated: now,
            color,
        }
    }

    /// Returns true once `interval` has elapsed since the last regeneration.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_regenerated) >= self.interval
    }

    /// Time left until the next regeneration, zero when overdue.
    #[must_use]
    pub fn time_until_regeneration(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last_regenerated))
    }

    /// Replaces every obstacle and restarts the interval from `now`.
    pub fn refresh<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: Grid,
        forbidden: &OccupancySet,
        now: Instant,
    ) {
        self.cells = regenerate(rng, grid, self.count, forbidden);
        self.last_regenerated = now;
        debug!(count = self.cells.len(), "obstacles regenerated");
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Obstacle cells in ascending order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.iter().map(|&cell| Tile {
            cell,
            color: self.color,
        })
    }
}

/// Draws `count` distinct cells outside `forbidden` by rejection sampling.
///
/// When the board has fewer free cells than requested, every free cell is
/// returned instead of sampling forever.
#[must_use]
pub fn regenerate<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    count: usize,
    forbidden: &OccupancySet,
) -> BTreeSet<Cell> {
    let free = forbidden.free_cells(grid).count();
    if free < count {
        warn!(requested = count, free, "not enough free cells for obstacles");
        return forbidden.free_cells(grid).collect();
    }

    let mut chosen = BTreeSet::new();
    while chosen.len() < count {
        let cell = grid.cell_at(
            rng.gen_range(0..grid.columns()),
            rng.gen_range(0..grid.rows()),
        );
        if !forbidden.contains(cell) {
            chosen.insert(cell);
        }
    }

    chosen
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::Rgb;
    use crate::grid::Grid;
    use crate::occupancy::OccupancySet;

    use super::{ObstacleField, regenerate};

    const GRAY: Rgb = Rgb::new(128, 128, 128);

    #[test]
    fn regenerate_returns_exactly_count_cells_outside_forbidden() {
        let grid = Grid::new(640, 480, 20);
        let forbidden: OccupancySet = (0..20).map(|column| grid.cell_at(column, 12)).collect();

        for seed in 0..25 {
            let mut rng = StdRng::seed_from_u64(seed);
            let cells = regenerate(&mut rng, grid, 10, &forbidden);

            assert_eq!(cells.len(), 10);
            assert!(cells.iter().all(|cell| !forbidden.contains(*cell)));
            assert!(cells.iter().all(|cell| grid.contains(*cell)));
        }
    }

    #[test]
    fn regenerate_is_capped_by_free_cells() {
        let grid = Grid::new(60, 20, 20);
        let mut rng = StdRng::seed_from_u64(1);
        let forbidden: OccupancySet = [grid.cell_at(0, 0)].into_iter().collect();

        let cells = regenerate(&mut rng, grid, 10, &forbidden);

        assert_eq!(cells.len(), 2);
        assert!(!cells.contains(&grid.cell_at(0, 0)));
    }

    #[test]
    fn field_is_due_only_after_interval() {
        let grid = Grid::new(200, 200, 20);
        let mut rng = StdRng::seed_from_u64(2);
        let start = Instant::now();
        let field = ObstacleField::new(
            &mut rng,
            grid,
            10,
            Duration::from_secs(30),
            &OccupancySet::new(),
            GRAY,
            start,
        );

        assert!(!field.is_due(start));
        assert!(!field.is_due(start + Duration::from_secs(29)));
        assert!(field.is_due(start + Duration::from_secs(30)));
        assert!(field.is_due(start + Duration::from_secs(31)));
        assert_eq!(
            field.time_until_regeneration(start + Duration::from_secs(10)),
            Duration::from_secs(20)
        );
    }

    #[test]
    fn refresh_restarts_interval_and_respects_forbidden() {
        let grid = Grid::new(100, 100, 20);
        let mut rng = StdRng::seed_from_u64(3);
        let start = Instant::now();
        let mut field = ObstacleField::new(
            &mut rng,
            grid,
            5,
            Duration::from_secs(30),
            &OccupancySet::new(),
            GRAY,
            start,
        );

        let later = start + Duration::from_secs(45);
        let forbidden: OccupancySet = (0..5).map(|column| grid.cell_at(column, 0)).collect();
        field.refresh(&mut rng, grid, &forbidden, later);

        assert_eq!(field.len(), 5);
        assert!(field.cells().all(|cell| !forbidden.contains(cell)));
        assert!(!field.is_due(later));
        assert!(field.tiles().all(|tile| tile.color == GRAY));
    }
}
