//! Configuration for the puzzle engine and the playback session.
//!
//! Both configurations have sensible defaults and fluent builders that
//! validate their input before handing out a value.

pub mod error;
pub mod playback;
pub mod puzzle;

pub use error::ConfigError;
pub use playback::{PlaybackConfig, PlaybackConfigBuilder, DEFAULT_STEP_DELAY};
pub use puzzle::{
    PuzzleConfig, PuzzleConfigBuilder, DEFAULT_BOAT_CAPACITY, DEFAULT_CANNIBALS,
    DEFAULT_MISSIONARIES,
};
