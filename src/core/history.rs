//! Append-only history of puzzle transitions.
//!
//! Every crossing produces a [`Transition`] holding the state it left and the
//! state it produced. [`History::record`] never mutates; it returns a new log
//! with the transition appended, so earlier snapshots keep their own history.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single transition between two states.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Transition<S: State> {
    /// The state before the transition
    pub from: S,
    /// The state after the transition
    pub to: S,
    /// When the transition was recorded
    pub timestamp: DateTime<Utc>,
}

impl<S: State> Transition<S> {
    /// Create a transition stamped with the current time.
    pub fn now(from: S, to: S) -> Self {
        Self {
            from,
            to,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered, append-only log of transitions.
///
/// # Example
///
/// ```rust
/// use river_crossing::core::{History, Transition};
/// use river_crossing::Status;
///
/// let history = History::new();
/// let history = history.record(Transition::now(Status::Ready, Status::Safe));
/// let history = history.record(Transition::now(Status::Safe, Status::Victory));
///
/// assert_eq!(history.path(), vec![&Status::Ready, &Status::Safe, &Status::Victory]);
/// assert_eq!(history.prior(), vec![&Status::Ready, &Status::Safe]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct History<S: State> {
    transitions: Vec<Transition<S>>,
}

impl<S: State> Default for History<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> History<S> {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The receiver is left untouched.
    pub fn record(&self, transition: Transition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// States traversed in order: the first `from`, then every `to`.
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|t| &t.to));
        path
    }

    /// Snapshots that were left behind, oldest first.
    pub fn prior(&self) -> Vec<&S> {
        self.transitions.iter().map(|t| &t.from).collect()
    }

    /// Elapsed time between the first and the last recorded transition.
    ///
    /// `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> &[Transition<S>] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&Transition<S>> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
