//! Errors raised by the configuration builders.

use thiserror::Error;

/// Errors that can occur when building puzzle or playback configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Puzzle has no units. Set .missionaries(n) or .cannibals(n) to a non-zero count")]
    NoUnits,

    #[error("Boat capacity must be at least 1, got {0}")]
    ZeroCapacity(u32),

    #[error("Step delay must be non-zero")]
    ZeroStepDelay,
}
