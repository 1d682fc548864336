//! Puzzle world state.
//!
//! A [`Position`] is the flat, copyable picture of one moment: two banks,
//! the boat, the crossing count and the derived [`Status`]. A [`PuzzleState`]
//! wraps the current position together with the history of positions that
//! led to it. States are never changed in place; the engine hands out a new
//! `PuzzleState` for every crossing.

use crate::core::{History, State, Transition};
use crate::puzzle::moves::Move;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of the river.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoatSide {
    Left,
    Right,
}

impl BoatSide {
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

impl fmt::Display for BoatSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Units standing on one bank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bank {
    pub missionaries: u32,
    pub cannibals: u32,
}

impl Bank {
    pub const EMPTY: Bank = Bank {
        missionaries: 0,
        cannibals: 0,
    };

    pub fn new(missionaries: u32, cannibals: u32) -> Self {
        Self {
            missionaries,
            cannibals,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.missionaries == 0 && self.cannibals == 0
    }

    /// A bank is safe when it has no missionaries to outnumber,
    /// or at least as many missionaries as cannibals.
    pub fn is_safe(&self) -> bool {
        self.missionaries == 0 || self.missionaries >= self.cannibals
    }

    pub(crate) fn without(self, mv: Move) -> Option<Bank> {
        Some(Bank {
            missionaries: self.missionaries.checked_sub(mv.missionaries)?,
            cannibals: self.cannibals.checked_sub(mv.cannibals)?,
        })
    }

    pub(crate) fn with(self, mv: Move) -> Option<Bank> {
        Some(Bank {
            missionaries: self.missionaries.checked_add(mv.missionaries)?,
            cannibals: self.cannibals.checked_add(mv.cannibals)?,
        })
    }
}

/// Derived classification of a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// The untouched starting position.
    Ready,
    /// Every bank is safe and the crossing is not finished.
    Safe,
    /// Missionaries are outnumbered on some bank. Terminal.
    Violated,
    /// Everybody reached the far bank. Terminal.
    Victory,
}

impl State for Status {
    fn name(&self) -> &str {
        match self {
            Self::Ready => "Ready",
            Self::Safe => "Safe",
            Self::Violated => "Violated",
            Self::Victory => "Victory",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Violated | Self::Victory)
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Violated)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot of the world at one point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub left: Bank,
    pub right: Bank,
    pub boat: BoatSide,
    pub move_count: u32,
    pub status: Status,
}

impl Position {
    pub fn bank(&self, side: BoatSide) -> Bank {
        match side {
            BoatSide::Left => self.left,
            BoatSide::Right => self.right,
        }
    }

    /// Same banks and same boat side, regardless of count or status.
    pub fn same_layout(&self, other: &Position) -> bool {
        self.left == other.left && self.right == other.right && self.boat == other.boat
    }
}

impl State for Position {
    fn name(&self) -> &str {
        self.status.name()
    }

    fn is_final(&self) -> bool {
        self.status.is_final()
    }

    fn is_error(&self) -> bool {
        self.status.is_error()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Left: {}M, {}C | Boat: {} | Right: {}M, {}C",
            self.left.missionaries,
            self.left.cannibals,
            self.boat,
            self.right.missionaries,
            self.right.cannibals
        )
    }
}

/// The current position plus everything that came before it.
///
/// Created by [`Engine::initial_state`](crate::Engine::initial_state) and
/// replaced wholesale by [`Engine::apply`](crate::Engine::apply).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PuzzleState {
    position: Position,
    history: History<Position>,
}

impl PuzzleState {
    pub(crate) fn from_position(position: Position) -> Self {
        Self {
            position,
            history: History::new(),
        }
    }

    /// New state at `next`, with the current position appended to history.
    pub(crate) fn advance(&self, next: Position) -> Self {
        Self {
            position: next,
            history: self.history.record(Transition::now(self.position, next)),
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn left(&self) -> Bank {
        self.position.left
    }

    pub fn right(&self) -> Bank {
        self.position.right
    }

    pub fn boat(&self) -> BoatSide {
        self.position.boat
    }

    pub fn move_count(&self) -> u32 {
        self.position.move_count
    }

    pub fn status(&self) -> Status {
        self.position.status
    }

    pub fn is_terminal(&self) -> bool {
        self.position.is_final()
    }

    pub fn history(&self) -> &History<Position> {
        &self.history
    }

    /// Positions this state has left behind, oldest first.
    pub fn prior_positions(&self) -> Vec<&Position> {
        self.history.prior()
    }

    /// Passengers carried by the most recent crossing.
    pub fn last_crossing(&self) -> Option<Move> {
        self.history
            .last()
            .and_then(|t| Move::between(&t.from, &t.to))
    }

    /// Fraction of `expected_moves` crossings already made, capped at 1.
    pub fn progress(&self, expected_moves: u32) -> f64 {
        if expected_moves == 0 {
            return 1.0;
        }
        (f64::from(self.move_count()) / f64::from(expected_moves)).min(1.0)
    }

    /// User-facing line describing the state.
    pub fn message(&self) -> String {
        match self.status() {
            Status::Ready => "Move missionaries and cannibals across the river safely.".to_string(),
            Status::Safe => "Good move! Keep going.".to_string(),
            Status::Victory => format!(
                "Victory! You solved the puzzle in {} moves.",
                self.move_count()
            ),
            Status::Violated => "Game over! Missionaries were eaten by cannibals.".to_string(),
        }
    }
}
