//! Step-by-step replay of a solution script.
//!
//! The controller is synchronous and owns no timer. It knows where it is in
//! the script and whether auto-play is wanted; the
//! [`PlaybackSession`](super::PlaybackSession) turns the auto-play flag into
//! scheduled steps.

use crate::core::State;
use crate::playback::error::{PlaybackError, ScriptIntegrityError};
use crate::playback::script::{ScriptEntry, SolutionScript};
use crate::puzzle::{Engine, Move, PuzzleError, PuzzleState};
use tracing::{debug, instrument};

/// Replays a [`SolutionScript`] against the engine one crossing at a time.
///
/// # Example
///
/// ```
/// use river_crossing::{Engine, PlaybackController, SolutionScript, Status};
///
/// let engine = Engine::default();
/// let mut controller = PlaybackController::new(engine, SolutionScript::canonical().unwrap());
/// let mut state = engine.initial_state();
///
/// while !controller.is_finished() {
///     state = controller.step(&state).unwrap();
/// }
///
/// assert_eq!(state.status(), Status::Victory);
/// assert_eq!(state.move_count(), 11);
/// ```
#[derive(Clone, Debug)]
pub struct PlaybackController {
    engine: Engine,
    script: SolutionScript,
    index: usize,
    auto_play: bool,
}

impl PlaybackController {
    pub fn new(engine: Engine, script: SolutionScript) -> Self {
        Self {
            engine,
            script,
            index: 0,
            auto_play: false,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn script(&self) -> &SolutionScript {
        &self.script
    }

    /// Number of scripted crossings already applied.
    pub fn script_index(&self) -> usize {
        self.index
    }

    pub fn is_auto_play(&self) -> bool {
        self.auto_play
    }

    /// True once the last entry has been reached.
    pub fn is_finished(&self) -> bool {
        self.index >= self.script.last_index()
    }

    pub fn current_entry(&self) -> Option<&ScriptEntry> {
        self.script.get(self.index)
    }

    /// Load the next step will carry, if any.
    pub fn next_move(&self) -> Option<Move> {
        self.script.move_at(self.index)
    }

    /// `Step k of N: label`, counting entries from one.
    pub fn step_label(&self) -> String {
        let label = self
            .current_entry()
            .map(|entry| entry.label.as_str())
            .unwrap_or_default();
        format!(
            "Step {} of {}: {}",
            self.index + 1,
            self.script.len(),
            label
        )
    }

    /// Apply the next scripted crossing to `current`.
    ///
    /// At the end of the script this returns `current` unchanged. Reaching
    /// the last entry switches auto-play off.
    #[instrument(skip_all, fields(index = self.index))]
    pub fn step(&mut self, current: &PuzzleState) -> Result<PuzzleState, PlaybackError> {
        if self.is_finished() {
            self.auto_play = false;
            return Ok(current.clone());
        }
        if current.is_terminal() {
            return Err(PuzzleError::TerminalState {
                status: current.status(),
            }
            .into());
        }

        let from = &self.script.entries()[self.index];
        if !from.matches(current.position()) {
            return Err(PlaybackError::OutOfSync { index: self.index });
        }

        let target = self.index + 1;
        let mv = self
            .script
            .move_at(self.index)
            .ok_or_else(|| integrity(ScriptIntegrityError::Disconnected { index: target }))?;
        let next = self.engine.apply(current, mv)?;
        if !self.script.entries()[target].matches(next.position()) {
            return Err(integrity(ScriptIntegrityError::Disconnected { index: target }));
        }

        self.index = target;
        if self.is_finished() {
            self.auto_play = false;
        }
        debug!(index = self.index, status = next.status().name(), "scripted step applied");
        Ok(next)
    }

    /// Switch auto-play on or off and return the resulting flag.
    ///
    /// Turning it on at the end of the script has no effect.
    pub fn set_auto_play(&mut self, enabled: bool) -> bool {
        self.auto_play = enabled && !self.is_finished();
        self.auto_play
    }

    /// Back to the first entry with auto-play off.
    pub fn reset(&mut self) {
        self.index = 0;
        self.auto_play = false;
    }
}

fn integrity(error: ScriptIntegrityError) -> PlaybackError {
    PlaybackError::ScriptIntegrity(vec![error])
}
