//! Playback error types.

use crate::puzzle::{IllegalReason, PuzzleError};
use thiserror::Error;

/// A single defect found in a solution script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScriptIntegrityError {
    #[error("Script has no entries")]
    Empty,

    #[error("Script does not start from the initial position")]
    StartMismatch,

    #[error("Entry {index} does not account for every unit")]
    Conservation { index: usize },

    #[error("Entry {index} ends the puzzle but more entries follow")]
    PrematureEnd { index: usize },

    #[error("Entry {index} is not one boat crossing away from entry {}", .index.saturating_sub(1))]
    Disconnected { index: usize },

    #[error("Entry {index} is reached by an illegal move: {reason}")]
    IllegalLink { index: usize, reason: IllegalReason },

    #[error("Script ends at entry {index} without reaching victory")]
    Unfinished { index: usize },
}

/// Errors that can occur while loading or replaying a script.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),

    #[error("Solution script failed validation ({} problem(s)): {}", .0.len(), join(.0))]
    ScriptIntegrity(Vec<ScriptIntegrityError>),

    #[error("Current state does not match script entry {index}")]
    OutOfSync { index: usize },

    #[error("A transition is already in progress")]
    Busy,

    #[error("Script could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

fn join(errors: &[ScriptIntegrityError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
