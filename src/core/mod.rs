//! Core state types shared by the puzzle engine and the playback shell.
//!
//! - States are described through the `State` trait
//! - Transitions are kept in an immutable, append-only `History`
//!
//! Everything in this module is pure.

mod history;
mod state;

pub use history::{History, Transition};
pub use state::State;
