//! Auto-play timing.

use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay between automatic steps when nothing else is configured.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(2000);

/// Settings for a [`PlaybackSession`](crate::playback::PlaybackSession).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Pause between the end of one step and the next automatic step.
    pub step_delay: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            step_delay: DEFAULT_STEP_DELAY,
        }
    }
}

impl PlaybackConfig {
    pub fn builder() -> PlaybackConfigBuilder {
        PlaybackConfigBuilder::new()
    }
}

/// Fluent builder for [`PlaybackConfig`].
#[derive(Clone, Debug)]
pub struct PlaybackConfigBuilder {
    step_delay: Duration,
}

impl PlaybackConfigBuilder {
    pub fn new() -> Self {
        Self {
            step_delay: DEFAULT_STEP_DELAY,
        }
    }

    pub fn step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    pub fn build(self) -> Result<PlaybackConfig, ConfigError> {
        if self.step_delay.is_zero() {
            return Err(ConfigError::ZeroStepDelay);
        }
        Ok(PlaybackConfig {
            step_delay: self.step_delay,
        })
    }
}

impl Default for PlaybackConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
