use std::time::{Duration, Instant};

use hazard_snake::apple::Apple;
use hazard_snake::config::GameConfig;
use hazard_snake::game::{GameState, ResetCause};
use hazard_snake::input::{Direction, GameInput};
use hazard_snake::obstacles::ObstacleField;

fn body(state: &GameState) -> Vec<(i32, i32)> {
    let grid = state.grid();
    state
        .snake
        .segments()
        .map(|cell| grid.index_of(*cell))
        .collect()
}

#[test]
fn stepwise_apple_collection_on_32_by_24_board() {
    let config = GameConfig {
        obstacle_count: 0,
        ..GameConfig::with_cells(32, 24)
    };
    let start = Instant::now();
    let mut state = GameState::new_with_seed(&config, 42, start).expect("valid config");
    let grid = state.grid();

    assert_eq!(body(&state), vec![(16, 12)]);
    assert_eq!(state.snake.direction(), Direction::Right);

    state.apple = Apple::new(grid.cell_at(17, 12), config.palette.apple);

    let outcome = state.tick(start + config.tick_interval);
    assert!(outcome.ate_apple);
    assert_eq!(state.snake.length(), 2);
    assert_eq!(body(&state), vec![(17, 12), (16, 12)]);
    assert_ne!(state.apple.position(), grid.cell_at(17, 12));
    assert!(!state.snake.occupies(state.apple.position()));

    // Keep the next step free of a second meal wherever the seed put the apple.
    if state.apple.position() == grid.cell_at(18, 12) {
        state.apple = Apple::new(grid.cell_at(0, 0), config.palette.apple);
    }

    state.tick(start + config.tick_interval * 2);
    assert_eq!(body(&state), vec![(18, 12), (17, 12)]);
    assert_eq!(state.snake.length(), 2);
}

#[test]
fn turning_into_an_obstacle_resets_to_the_start_cell() {
    let config = GameConfig::with_cells(32, 24);
    let start = Instant::now();
    let mut state = GameState::new_with_seed(&config, 7, start).expect("valid config");
    let grid = state.grid();

    state.apple = Apple::new(grid.cell_at(17, 12), config.palette.apple);
    state.obstacles = ObstacleField::with_cells(
        [grid.cell_at(17, 11)],
        config.obstacle_interval,
        config.palette.obstacle,
        start,
    );

    state.tick(start + Duration::from_millis(100));
    assert_eq!(state.snake.length(), 2);

    state.apply_input(GameInput::Direction(Direction::Up));
    let outcome = state.tick(start + Duration::from_millis(200));

    assert_eq!(outcome.reset, Some(ResetCause::Obstacle));
    assert_eq!(body(&state), vec![(16, 12)]);
    assert_eq!(state.snake.direction(), Direction::Right);
    assert_eq!(state.stats.best_length, 2);
}

#[test]
fn long_session_keeps_entities_apart() {
    let config = GameConfig {
        obstacle_interval: Duration::from_secs(3),
        ..GameConfig::with_cells(32, 24)
    };
    let start = Instant::now();
    let mut state = GameState::new_with_seed(&config, 2024, start).expect("valid config");
    let turns = [Direction::Down, Direction::Right, Direction::Up, Direction::Right];

    for step in 1..=600_u32 {
        if step % 5 == 0 {
            let turn = turns[(step as usize / 5) % turns.len()];
            state.apply_input(GameInput::Direction(turn));
        }
        let now = start + config.tick_interval * step;
        state.tick(now);

        let grid = state.grid();
        assert!(state.snake.segments().all(|cell| grid.contains(*cell)));
        assert!(state.snake.len() <= state.snake.length());
        assert!(!state.snake.occupies(state.apple.position()));
        assert!(!state.obstacles.contains(state.apple.position()));
        assert!(!state.obstacles.contains(state.snake.head()));
        assert_eq!(state.obstacles.len(), config.obstacle_count);
    }

    assert_eq!(state.tick_count, 600);
}
