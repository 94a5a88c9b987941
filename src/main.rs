use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use hazard_snake::config::{
    DEFAULT_CELL_SIZE, DEFAULT_OBSTACLE_COUNT, DEFAULT_OBSTACLE_INTERVAL_SECS,
    DEFAULT_TICK_INTERVAL_MS, GameConfig,
};
use hazard_snake::error::AppError;
use hazard_snake::{headless, terminal_runtime};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seed for apple and obstacle placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between simulation ticks.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Edge length of one cell in world units (the world is 640x480).
    #[arg(long = "cell-size", default_value_t = DEFAULT_CELL_SIZE)]
    cell_size: u32,

    /// Number of obstacle cells on the board.
    #[arg(long, default_value_t = DEFAULT_OBSTACLE_COUNT)]
    obstacles: usize,

    /// Seconds between obstacle regenerations.
    #[arg(long = "obstacle-interval-secs", default_value_t = DEFAULT_OBSTACLE_INTERVAL_SECS)]
    obstacle_interval_secs: u64,

    /// Run without a terminal UI and print one JSON snapshot per tick.
    #[arg(long)]
    headless: bool,

    /// Number of ticks to simulate in headless mode.
    #[arg(long, default_value_t = 100, requires = "headless")]
    ticks: u64,

    /// Write log output to this file (terminal mode logs nothing otherwise).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            cell_size: self.cell_size,
            tick_interval: Duration::from_millis(self.tick_ms),
            obstacle_count: self.obstacles,
            obstacle_interval: Duration::from_secs(self.obstacle_interval_secs),
            ..GameConfig::default()
        }
    }
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let config = cli.game_config();
    config.validate()?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, headless = cli.headless, "starting");

    if cli.headless {
        let stdout = io::stdout();
        headless::run(&config, seed, cli.ticks, &mut stdout.lock())?;
        return Ok(());
    }

    terminal_runtime::install_panic_hook();
    terminal_runtime::run(&config, seed)
}

/// Stderr is only safe to log to when the alternate screen is not in use.
fn init_tracing(cli: &Cli) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = &cli.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(AppError::Logging)?;
    } else if cli.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init()
            .map_err(AppError::Logging)?;
    }

    Ok(())
}
