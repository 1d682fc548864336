//! Scripted solution playback.
//!
//! # Key Concepts
//!
//! - **Script**: an externally supplied table of positions, validated once on load
//! - **Controller**: synchronous cursor into the script that steps the engine
//! - **Session**: async shell that owns the state and the auto-play timer
//!
//! Only the session touches a runtime. The controller and script are plain
//! values and can be driven from any loop.

mod controller;
mod error;
mod script;
mod session;

pub use controller::PlaybackController;
pub use error::{PlaybackError, ScriptIntegrityError};
pub use script::{canonical_entries, ScriptEntry, SolutionScript};
pub use session::{PlaybackSession, TransitionGuard};
