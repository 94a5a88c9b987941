use std::io;
use std::panic;
use std::time::Instant;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::config::GameConfig;
use crate::error::AppError;
use crate::game::GameState;
use crate::input::{GameInput, InputHandler};
use crate::renderer;

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Owns terminal lifecycle (raw mode + alternate screen) for one session.
///
/// On drop, this type restores terminal state best-effort.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Enters raw mode, switches to alternate screen, and creates a ratatui terminal.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let backend = CrosstermBackend::new(stdout);
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let _ = cleanup_terminal_best_effort();
                Err(error)
            }
        }
    }

    /// Returns mutable access to the inner ratatui terminal.
    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = cleanup_terminal_best_effort();
    }
}

/// Runs the interactive session until the player quits.
///
/// Input is polled while waiting for the next tick, so key presses land in
/// the state's direction queue between ticks.
pub fn run(config: &GameConfig, seed: u64) -> Result<(), AppError> {
    let mut state = GameState::new_with_seed(config, seed, Instant::now())?;
    let grid = state.grid();
    let mut input = InputHandler::new();
    let mut session = TerminalSession::enter()?;
    let mut last_tick = Instant::now();

    loop {
        let snapshot = state.snapshot(Instant::now());
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &snapshot, grid, &config.palette))?;

        let wait = config.tick_interval.saturating_sub(last_tick.elapsed());
        if let Some(game_input) = input.poll_input(wait)? {
            if game_input == GameInput::Quit {
                break;
            }
            state.apply_input(game_input);
        }

        if last_tick.elapsed() >= config.tick_interval {
            last_tick = Instant::now();
            state.tick(last_tick);
        }
    }

    info!(
        ticks = state.tick_count,
        best_length = state.stats.best_length,
        resets = state.stats.resets(),
        "session ended"
    );
    Ok(())
}

/// Restores the terminal before the default panic output is printed.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort();
        default_hook(panic_info);
    }));
}

fn cleanup_terminal_best_effort() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}
