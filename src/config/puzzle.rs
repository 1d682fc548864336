//! Puzzle dimensions: unit totals and boat capacity.

use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MISSIONARIES: u32 = 3;
pub const DEFAULT_CANNIBALS: u32 = 3;
pub const DEFAULT_BOAT_CAPACITY: u32 = 2;

/// Parameters of one puzzle instance.
///
/// The classic puzzle is three missionaries, three cannibals and a boat
/// for two, which is what [`Default`] yields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub total_missionaries: u32,
    pub total_cannibals: u32,
    pub boat_capacity: u32,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            total_missionaries: DEFAULT_MISSIONARIES,
            total_cannibals: DEFAULT_CANNIBALS,
            boat_capacity: DEFAULT_BOAT_CAPACITY,
        }
    }
}

impl PuzzleConfig {
    pub fn builder() -> PuzzleConfigBuilder {
        PuzzleConfigBuilder::new()
    }
}

/// Fluent builder for [`PuzzleConfig`].
///
/// # Example
///
/// ```
/// use river_crossing::config::PuzzleConfigBuilder;
///
/// let config = PuzzleConfigBuilder::new()
///     .missionaries(4)
///     .cannibals(4)
///     .capacity(3)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.boat_capacity, 3);
/// ```
#[derive(Clone, Debug)]
pub struct PuzzleConfigBuilder {
    missionaries: u32,
    cannibals: u32,
    capacity: u32,
}

impl PuzzleConfigBuilder {
    /// Start from the classic 3/3/2 dimensions.
    pub fn new() -> Self {
        Self {
            missionaries: DEFAULT_MISSIONARIES,
            cannibals: DEFAULT_CANNIBALS,
            capacity: DEFAULT_BOAT_CAPACITY,
        }
    }

    pub fn missionaries(mut self, n: u32) -> Self {
        self.missionaries = n;
        self
    }

    pub fn cannibals(mut self, n: u32) -> Self {
        self.cannibals = n;
        self
    }

    pub fn capacity(mut self, n: u32) -> Self {
        self.capacity = n;
        self
    }

    /// Build the configuration.
    /// Returns an error if the puzzle would be empty or the boat could carry nobody.
    pub fn build(self) -> Result<PuzzleConfig, ConfigError> {
        if self.missionaries == 0 && self.cannibals == 0 {
            return Err(ConfigError::NoUnits);
        }
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity(self.capacity));
        }

        Ok(PuzzleConfig {
            total_missionaries: self.missionaries,
            total_cannibals: self.cannibals,
            boat_capacity: self.capacity,
        })
    }
}

impl Default for PuzzleConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
