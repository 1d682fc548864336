//! The river-crossing puzzle: world state, boat loads and the rules engine.
//!
//! Everything here is pure. `Engine::apply` is the only way to move from
//! one [`PuzzleState`] to the next, and it hands back a new value.

mod engine;
mod error;
mod moves;
mod state;

pub use engine::{classify, Engine};
pub use error::{IllegalReason, PuzzleError};
pub use moves::{Move, Selection};
pub use state::{Bank, BoatSide, Position, PuzzleState, Status};
