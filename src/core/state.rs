//! Core State trait for puzzle states.
//!
//! Anything recorded in a [`History`](super::History) implements this trait,
//! which provides pure methods for inspecting a state without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for puzzle states.
///
/// All methods are pure - no side effects. States are immutable values that
/// describe one moment of the puzzle.
///
/// # Required Traits
///
/// - `Clone`: states are copied into history on every crossing
/// - `PartialEq`: states are compared against scripted entries
/// - `Debug`: states appear in diagnostics and log fields
/// - `Serialize` + `Deserialize`: states can be handed to a presentation layer as data
///
/// # Example
///
/// ```rust
/// use river_crossing::core::State;
/// use river_crossing::Status;
///
/// assert_eq!(Status::Victory.name(), "Victory");
/// assert!(Status::Violated.is_final());
/// assert!(Status::Violated.is_error());
/// assert!(!Status::Safe.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a terminal state.
    ///
    /// No further crossings are accepted from a terminal state; the puzzle
    /// has to be reset first.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is a losing state.
    ///
    /// Error states are also final, but not every final state is an error.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}
