//! Errors raised by the puzzle engine.

use crate::puzzle::moves::Move;
use crate::puzzle::state::{BoatSide, Status};
use thiserror::Error;

/// Why a boat load was refused.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum IllegalReason {
    #[error("the boat cannot cross empty")]
    EmptyBoat,

    #[error("{passengers} passengers exceed the boat capacity of {capacity}")]
    OverCapacity { passengers: u32, capacity: u32 },

    #[error("the {side} bank does not have enough units for this load")]
    Unavailable { side: BoatSide },

    #[error("this move would leave missionaries outnumbered by cannibals on the {side} bank")]
    Unsafe { side: BoatSide },
}

/// Errors returned by [`Engine::apply`](crate::Engine::apply).
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Illegal move {mv}: {reason}")]
    IllegalMove { mv: Move, reason: IllegalReason },

    #[error("Puzzle already ended in state '{status}'; reset before moving again")]
    TerminalState { status: Status },
}
