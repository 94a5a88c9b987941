use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// Failures surfaced by the binary front ends.
///
/// The simulation itself never fails once configured; collisions are state
/// transitions, not errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to install log subscriber: {0}")]
    Logging(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}
