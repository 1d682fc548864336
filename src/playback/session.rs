//! Async shell around the playback controller.
//!
//! A session owns the current [`PuzzleState`], the [`PlaybackController`]
//! and at most one scheduled auto-advance task. Everything the task touches
//! sits behind one `tokio::sync::Mutex`. Cancelling bumps a generation
//! counter under that lock and aborts the task, so a tick that wakes after
//! cancellation sees a stale generation and leaves the state alone.

use crate::config::PlaybackConfig;
use crate::core::State;
use crate::playback::controller::PlaybackController;
use crate::playback::error::PlaybackError;
use crate::playback::script::SolutionScript;
use crate::puzzle::{Engine, Move, PuzzleState};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, instrument, warn, Instrument};
use uuid::Uuid;

struct Shared {
    controller: PlaybackController,
    state: PuzzleState,
    generation: u64,
    ticker: Option<JoinHandle<()>>,
}

impl Shared {
    fn cancel_ticker(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            debug!(generation = self.generation, "scheduled step cancelled");
        }
    }

    fn advance(&mut self) -> Result<PuzzleState, PlaybackError> {
        let next = self.controller.step(&self.state)?;
        self.state = next.clone();
        Ok(next)
    }
}

/// Marks a visual transition as in progress until dropped.
///
/// While one is alive, manual moves and steps fail with
/// [`PlaybackError::Busy`] and auto-play ticks are skipped.
#[derive(Debug)]
pub struct TransitionGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for TransitionGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// One playback session: current state, script position and auto-play timer.
///
/// Must be driven from within a tokio runtime.
pub struct PlaybackSession {
    id: Uuid,
    config: PlaybackConfig,
    shared: Arc<Mutex<Shared>>,
    in_flight: Arc<AtomicBool>,
}

impl PlaybackSession {
    pub fn new(engine: Engine, script: SolutionScript, config: PlaybackConfig) -> Self {
        let shared = Shared {
            state: engine.initial_state(),
            controller: PlaybackController::new(engine, script),
            generation: 0,
            ticker: None,
        };
        Self {
            id: Uuid::new_v4(),
            config,
            shared: Arc::new(Mutex::new(shared)),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Classic puzzle, classic script, default timing.
    pub fn canonical() -> Result<Self, PlaybackError> {
        Ok(Self::new(
            Engine::default(),
            SolutionScript::canonical()?,
            PlaybackConfig::default(),
        ))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub async fn state(&self) -> PuzzleState {
        self.shared.lock().await.state.clone()
    }

    pub async fn script_index(&self) -> usize {
        self.shared.lock().await.controller.script_index()
    }

    pub async fn is_auto_play(&self) -> bool {
        self.shared.lock().await.controller.is_auto_play()
    }

    /// Whether the script has reached its last entry.
    pub async fn is_finished(&self) -> bool {
        self.shared.lock().await.controller.is_finished()
    }

    pub async fn step_label(&self) -> String {
        self.shared.lock().await.controller.step_label()
    }

    /// Scripted label while replaying, otherwise the state's own message.
    pub async fn message(&self) -> String {
        let shared = self.shared.lock().await;
        let replaying = shared.controller.script_index() > 0
            && !shared.state.is_terminal()
            && shared
                .controller
                .current_entry()
                .is_some_and(|entry| entry.matches(shared.state.position()));

        match shared.controller.current_entry() {
            Some(entry) if replaying => entry.label.clone(),
            _ => shared.state.message(),
        }
    }

    /// Share of the scripted crossings completed.
    pub async fn progress(&self) -> f64 {
        let shared = self.shared.lock().await;
        shared.state.progress(shared.controller.script().crossings())
    }

    /// Claim the single in-flight transition slot.
    pub fn begin_transition(&self) -> Result<TransitionGuard, PlaybackError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                warn!(session = %self.id, "transition already in progress");
                PlaybackError::Busy
            })?;
        Ok(TransitionGuard {
            flag: Arc::clone(&self.in_flight),
        })
    }

    pub fn is_transitioning(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Manual play: apply `mv` to the current state.
    ///
    /// Auto-play is switched off, since the state no longer follows the script.
    #[instrument(skip_all, fields(session = %self.id, mv = %mv))]
    pub async fn play_move(&self, mv: Move) -> Result<PuzzleState, PlaybackError> {
        self.ensure_idle()?;
        let mut shared = self.shared.lock().await;

        let next = shared.controller.engine().apply(&shared.state, mv)?;
        shared.state = next.clone();
        if shared.controller.is_auto_play() {
            shared.controller.set_auto_play(false);
            shared.cancel_ticker();
            info!("auto-play stopped by manual move");
        }
        Ok(next)
    }

    /// Advance one scripted step now.
    ///
    /// If auto-play is on, the next automatic step is rescheduled one full
    /// delay after this one.
    #[instrument(skip_all, fields(session = %self.id))]
    pub async fn step(&self) -> Result<PuzzleState, PlaybackError> {
        self.ensure_idle()?;
        let mut shared = self.shared.lock().await;

        let next = shared.advance()?;
        if shared.controller.is_auto_play() {
            self.schedule(&mut shared);
        } else {
            shared.cancel_ticker();
        }
        Ok(next)
    }

    /// Switch auto-play on or off and return the resulting flag.
    #[instrument(skip_all, fields(session = %self.id, enabled = enabled))]
    pub async fn set_auto_play(&self, enabled: bool) -> bool {
        let mut shared = self.shared.lock().await;

        let on = shared.controller.set_auto_play(enabled);
        if !on {
            shared.cancel_ticker();
        } else if shared.ticker.is_none() {
            self.schedule(&mut shared);
        }
        on
    }

    /// Cancel any pending step and return to the initial state.
    #[instrument(skip_all, fields(session = %self.id))]
    pub async fn reset(&self) {
        let mut shared = self.shared.lock().await;

        shared.cancel_ticker();
        shared.controller.reset();
        shared.state = shared.controller.engine().initial_state();
        debug!("session reset");
    }

    fn ensure_idle(&self) -> Result<(), PlaybackError> {
        if self.is_transitioning() {
            warn!(session = %self.id, "trigger rejected while a transition is in progress");
            return Err(PlaybackError::Busy);
        }
        Ok(())
    }

    /// Replace any pending tick with a fresh one a full delay from now.
    fn schedule(&self, shared: &mut Shared) {
        shared.cancel_ticker();
        let generation = shared.generation;
        let span = info_span!("auto_play", session = %self.id, generation);
        let task = run_ticker(
            Arc::downgrade(&self.shared),
            generation,
            self.config.step_delay,
            Arc::clone(&self.in_flight),
        );
        shared.ticker = Some(tokio::spawn(task.instrument(span)));
        debug!(delay = ?self.config.step_delay, "next step scheduled");
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        if let Ok(mut shared) = self.shared.try_lock() {
            shared.cancel_ticker();
        }
    }
}

async fn run_ticker(
    handle: Weak<Mutex<Shared>>,
    generation: u64,
    delay: Duration,
    in_flight: Arc<AtomicBool>,
) {
    loop {
        tokio::time::sleep(delay).await;

        let Some(strong) = handle.upgrade() else {
            return;
        };
        let mut shared = strong.lock().await;
        if shared.generation != generation || !shared.controller.is_auto_play() {
            return;
        }
        if in_flight.load(Ordering::Acquire) {
            warn!("transition in progress, auto-play tick skipped");
            continue;
        }

        match shared.advance() {
            Ok(state) => debug!(
                index = shared.controller.script_index(),
                status = state.status().name(),
                "auto-play step"
            ),
            Err(err) => {
                warn!(%err, "auto-play stopped");
                shared.controller.set_auto_play(false);
                shared.ticker = None;
                return;
            }
        }

        if !shared.controller.is_auto_play() {
            info!("auto-play reached the end of the script");
            shared.ticker = None;
            return;
        }
    }
}
