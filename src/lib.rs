//! Snake on a toroidal grid with periodically regenerating obstacles.
//!
//! The simulation core ([`game::GameState`] and the entity modules it drives)
//! knows nothing about terminals; front ends feed it [`input::GameInput`]s
//! and draw the [`snapshot::Snapshot`] it publishes after every tick.

pub mod apple;
pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod headless;
pub mod input;
pub mod obstacles;
pub mod occupancy;
pub mod renderer;
pub mod snake;
pub mod snapshot;
pub mod terminal_runtime;
pub mod ui;
