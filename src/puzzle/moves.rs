//! Boat loads and the passenger picker.

use crate::puzzle::state::{Bank, BoatSide, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Units that ride the boat from its current bank to the other one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub missionaries: u32,
    pub cannibals: u32,
}

impl Move {
    pub fn new(missionaries: u32, cannibals: u32) -> Self {
        Self {
            missionaries,
            cannibals,
        }
    }

    /// Total riders, saturating at `u32::MAX`.
    pub fn passengers(&self) -> u32 {
        self.missionaries.saturating_add(self.cannibals)
    }

    pub fn is_empty(&self) -> bool {
        self.passengers() == 0
    }

    /// Recover the load that turns `from` into `to`.
    ///
    /// Returns `None` unless the boat switched sides and exactly the units
    /// that left the departure bank arrived on the other one.
    pub fn between(from: &Position, to: &Position) -> Option<Move> {
        if to.boat != from.boat.opposite() {
            return None;
        }
        let departed = from.bank(from.boat);
        let remained = to.bank(from.boat);
        let mv = Move {
            missionaries: departed.missionaries.checked_sub(remained.missionaries)?,
            cannibals: departed.cannibals.checked_sub(remained.cannibals)?,
        };

        let arrival = from.bank(to.boat).with(mv)?;
        (arrival == to.bank(to.boat)).then_some(mv)
    }

    /// Human-readable description, e.g. `Move 1 missionary & 1 cannibal to left`.
    pub fn describe(&self, toward: BoatSide) -> String {
        let mut parts = Vec::with_capacity(2);
        match self.missionaries {
            0 => {}
            1 => parts.push("1 missionary".to_string()),
            n => parts.push(format!("{n} missionaries")),
        }
        match self.cannibals {
            0 => {}
            1 => parts.push("1 cannibal".to_string()),
            n => parts.push(format!("{n} cannibals")),
        }
        if parts.is_empty() {
            parts.push("nobody".to_string());
        }
        format!(
            "Move {} to {}",
            parts.join(" & "),
            toward.label().to_lowercase()
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}M {}C", self.missionaries, self.cannibals)
    }
}

/// Passenger picker bound to the bank that currently holds the boat.
///
/// Increments are clamped so the selection never exceeds what is
/// standing on the bank or what the boat can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    missionaries: u32,
    cannibals: u32,
    available: Bank,
    capacity: u32,
}

impl Selection {
    pub fn new(available: Bank, capacity: u32) -> Self {
        Self {
            missionaries: 0,
            cannibals: 0,
            available,
            capacity,
        }
    }

    pub fn missionaries(&self) -> u32 {
        self.missionaries
    }

    pub fn cannibals(&self) -> u32 {
        self.cannibals
    }

    pub fn total(&self) -> u32 {
        self.missionaries + self.cannibals
    }

    pub fn can_add_missionary(&self) -> bool {
        self.total() < self.capacity && self.missionaries < self.available.missionaries
    }

    pub fn can_add_cannibal(&self) -> bool {
        self.total() < self.capacity && self.cannibals < self.available.cannibals
    }

    /// Returns `false` when the increment was clamped away.
    pub fn add_missionary(&mut self) -> bool {
        if !self.can_add_missionary() {
            return false;
        }
        self.missionaries += 1;
        true
    }

    pub fn add_cannibal(&mut self) -> bool {
        if !self.can_add_cannibal() {
            return false;
        }
        self.cannibals += 1;
        true
    }

    pub fn remove_missionary(&mut self) -> bool {
        if self.missionaries == 0 {
            return false;
        }
        self.missionaries -= 1;
        true
    }

    pub fn remove_cannibal(&mut self) -> bool {
        if self.cannibals == 0 {
            return false;
        }
        self.cannibals -= 1;
        true
    }

    pub fn clear(&mut self) {
        self.missionaries = 0;
        self.cannibals = 0;
    }

    pub fn as_move(&self) -> Move {
        Move::new(self.missionaries, self.cannibals)
    }
}
