use std::io::Write;
use std::time::Instant;

use tracing::debug;

use crate::config::GameConfig;
use crate::error::AppError;
use crate::game::GameState;

/// Runs `ticks` ticks without a terminal, writing one JSON snapshot per line.
///
/// Time is simulated: every tick advances the clock by the configured tick
/// interval, so obstacle regeneration is reproducible for a given seed.
pub fn run<W: Write>(
    config: &GameConfig,
    seed: u64,
    ticks: u64,
    out: &mut W,
) -> Result<GameState, AppError> {
    let start = Instant::now();
    let mut state = GameState::new_with_seed(config, seed, start)?;
    let mut now = start;

    for _ in 0..ticks {
        now += config.tick_interval;
        let outcome = state.tick(now);
        if outcome.reset.is_some() || outcome.obstacles_regenerated {
            debug!(tick = state.tick_count, ?outcome, "tick");
        }

        serde_json::to_writer(&mut *out, &state.snapshot(now))?;
        out.write_all(b"\n")?;
    }

    out.flush()?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::Value;

    use crate::config::GameConfig;

    use super::run;

    #[test]
    fn writes_one_snapshot_per_tick() {
        let config = GameConfig::default();
        let mut out = Vec::new();

        let state = run(&config, 17, 5, &mut out).expect("headless run should succeed");

        let text = String::from_utf8(out).expect("output is utf-8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(state.tick_count, 5);

        let last: Value = serde_json::from_str(lines[4]).expect("line is json");
        assert_eq!(last["tick"], 5);
        assert_eq!(last["direction"], "right");
        assert_eq!(last["apple"]["color"]["r"], 255);
        assert!(last["snake"].as_array().is_some_and(|body| !body.is_empty()));
    }

    #[test]
    fn same_seed_produces_same_stream() {
        let config = GameConfig {
            obstacle_interval: Duration::from_secs(1),
            ..GameConfig::default()
        };
        let mut first = Vec::new();
        let mut second = Vec::new();

        run(&config, 5, 40, &mut first).expect("first run");
        run(&config, 5, 40, &mut second).expect("second run");

        assert_eq!(first, second);
    }
}
