//! River Crossing: the missionaries and cannibals puzzle as a pure engine
//! with scripted solution playback.
//!
//! The crate follows a "pure core, imperative shell" layout. The rules live
//! in pure functions over immutable snapshots; timers and shared state are
//! confined to the playback session.
//!
//! # Core Concepts
//!
//! - **PuzzleState**: immutable snapshot of both banks, the boat and the history
//! - **Engine**: validates boat loads, applies them and classifies the result
//! - **PlaybackController**: steps through a supplied solution script
//! - **PlaybackSession**: runs the controller on a cancellable auto-play timer
//!
//! # Example
//!
//! ```rust
//! use river_crossing::{Engine, Move, Status};
//!
//! let engine = Engine::default();
//! let start = engine.initial_state();
//!
//! // one missionary alone would leave two missionaries with three cannibals
//! assert!(!engine.is_legal(&start, Move::new(1, 0)));
//!
//! let next = engine.apply(&start, Move::new(0, 2)).unwrap();
//! assert_eq!(next.status(), Status::Safe);
//! assert_eq!(next.left().cannibals, 1);
//! assert_eq!(start.move_count(), 0);
//! ```

pub mod config;
pub mod core;
pub mod playback;
pub mod puzzle;

// Re-export commonly used types
pub use config::{ConfigError, PlaybackConfig, PuzzleConfig};
pub use playback::{
    PlaybackController, PlaybackError, PlaybackSession, ScriptEntry, ScriptIntegrityError,
    SolutionScript,
};
pub use puzzle::{
    classify, Bank, BoatSide, Engine, IllegalReason, Move, Position, PuzzleError, PuzzleState,
    Selection, Status,
};
