//! Solution scripts: an externally supplied table of positions to replay.
//!
//! A script is checked once, when it is loaded. Every defect is collected
//! with `Validation` so the caller sees the whole list instead of the first
//! broken link.

use crate::core::State;
use crate::playback::error::{PlaybackError, ScriptIntegrityError};
use crate::puzzle::{classify, Bank, BoatSide, Engine, Move, Position, Status};
use serde::{Deserialize, Serialize};
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// One row of a solution script.
///
/// `label` describes the crossing that produced this row and is shown
/// verbatim; it is never generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEntry {
    #[serde(rename = "leftM")]
    pub left_missionaries: u32,
    #[serde(rename = "leftC")]
    pub left_cannibals: u32,
    #[serde(rename = "boatSide")]
    pub boat: BoatSide,
    #[serde(rename = "rightM")]
    pub right_missionaries: u32,
    #[serde(rename = "rightC")]
    pub right_cannibals: u32,
    pub label: String,
}

impl ScriptEntry {
    pub fn new(left: Bank, boat: BoatSide, right: Bank, label: impl Into<String>) -> Self {
        Self {
            left_missionaries: left.missionaries,
            left_cannibals: left.cannibals,
            boat,
            right_missionaries: right.missionaries,
            right_cannibals: right.cannibals,
            label: label.into(),
        }
    }

    pub fn left(&self) -> Bank {
        Bank::new(self.left_missionaries, self.left_cannibals)
    }

    pub fn right(&self) -> Bank {
        Bank::new(self.right_missionaries, self.right_cannibals)
    }

    /// The entry as a classified position after `move_count` crossings.
    pub fn position(&self, move_count: u32) -> Position {
        let mut position = Position {
            left: self.left(),
            right: self.right(),
            boat: self.boat,
            move_count,
            status: Status::Safe,
        };
        position.status = classify(&position);
        position
    }

    /// Whether `position` has this entry's banks and boat side.
    pub fn matches(&self, position: &Position) -> bool {
        self.left() == position.left && self.right() == position.right && self.boat == position.boat
    }
}

impl fmt::Display for ScriptEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.position(0).fmt(f)
    }
}

/// A validated, read-only sequence of script entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SolutionScript {
    entries: Vec<ScriptEntry>,
}

impl SolutionScript {
    /// Validate `entries` against `engine` and wrap them.
    ///
    /// The first entry must be the engine's initial position, every
    /// consecutive pair must be one legal crossing apart and the last entry
    /// must be a victory.
    pub fn new(engine: &Engine, entries: Vec<ScriptEntry>) -> Result<Self, PlaybackError> {
        match validate(engine, &entries) {
            Validation::Success(_) => Ok(Self { entries }),
            Validation::Failure(errors) => Err(PlaybackError::ScriptIntegrity(
                errors.iter().cloned().collect(),
            )),
        }
    }

    /// Parse a JSON array of entries and validate it.
    ///
    /// ```
    /// use river_crossing::config::PuzzleConfigBuilder;
    /// use river_crossing::{Engine, SolutionScript};
    ///
    /// let config = PuzzleConfigBuilder::new().missionaries(1).cannibals(1).build().unwrap();
    /// let json = r#"[
    ///     {"leftM": 1, "leftC": 1, "boatSide": "Left", "rightM": 0, "rightC": 0, "label": "Initial state"},
    ///     {"leftM": 0, "leftC": 0, "boatSide": "Right", "rightM": 1, "rightC": 1, "label": "Move 1 missionary & 1 cannibal to right"}
    /// ]"#;
    /// let script = SolutionScript::from_json(&Engine::new(config), json).unwrap();
    /// assert_eq!(script.len(), 2);
    /// ```
    pub fn from_json(engine: &Engine, json: &str) -> Result<Self, PlaybackError> {
        let entries: Vec<ScriptEntry> = serde_json::from_str(json)?;
        Self::new(engine, entries)
    }

    /// The classic eleven-crossing solution for three missionaries,
    /// three cannibals and a boat for two.
    pub fn canonical() -> Result<Self, PlaybackError> {
        Self::new(&Engine::default(), canonical_entries())
    }

    pub fn entries(&self) -> &[ScriptEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ScriptEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the final entry.
    pub fn last_index(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    /// Number of crossings the script performs.
    pub fn crossings(&self) -> u32 {
        u32::try_from(self.last_index()).unwrap_or(u32::MAX)
    }

    /// Load that leads from entry `index` to entry `index + 1`.
    pub fn move_at(&self, index: usize) -> Option<Move> {
        let from = self.entries.get(index)?;
        let to = self.entries.get(index + 1)?;
        Move::between(&from.position(0), &to.position(0))
    }
}

fn require(
    ok: bool,
    error: ScriptIntegrityError,
) -> Validation<(), NonEmptyVec<ScriptIntegrityError>> {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(error)
    }
}

fn validate(
    engine: &Engine,
    entries: &[ScriptEntry],
) -> Validation<(), NonEmptyVec<ScriptIntegrityError>> {
    let Some(first) = entries.first() else {
        return Validation::fail(ScriptIntegrityError::Empty);
    };

    let config = engine.config();
    let mut checks: Vec<Validation<(), NonEmptyVec<ScriptIntegrityError>>> = Vec::new();

    checks.push(require(
        first.matches(&engine.initial_position()),
        ScriptIntegrityError::StartMismatch,
    ));

    for (index, entry) in entries.iter().enumerate() {
        let conserved = entry.left_missionaries.checked_add(entry.right_missionaries)
            == Some(config.total_missionaries)
            && entry.left_cannibals.checked_add(entry.right_cannibals)
                == Some(config.total_cannibals);
        checks.push(require(
            conserved,
            ScriptIntegrityError::Conservation { index },
        ));
    }

    for (offset, pair) in entries.windows(2).enumerate() {
        let index = offset + 1;
        let from = pair[0].position(offset as u32);
        let to = pair[1].position(index as u32);

        if from.is_final() {
            checks.push(Validation::fail(ScriptIntegrityError::PrematureEnd {
                index: offset,
            }));
            continue;
        }

        let link = match Move::between(&from, &to) {
            None => Validation::fail(ScriptIntegrityError::Disconnected { index }),
            Some(mv) => match engine.check_position(&from, mv) {
                Ok(next) => require(
                    next.same_layout(&to),
                    ScriptIntegrityError::Disconnected { index },
                ),
                Err(reason) => Validation::fail(ScriptIntegrityError::IllegalLink { index, reason }),
            },
        };
        checks.push(link);
    }

    let last = entries.len() - 1;
    checks.push(require(
        entries[last].position(0).status == Status::Victory,
        ScriptIntegrityError::Unfinished { index: last },
    ));

    Validation::all_vec(checks).map(|_| ())
}

/// Rows of the classic solution, initial position first.
pub fn canonical_entries() -> Vec<ScriptEntry> {
    use BoatSide::{Left, Right};

    let rows: [((u32, u32), BoatSide, (u32, u32), &str); 12] = [
        ((3, 3), Left, (0, 0), "Initial state"),
        ((3, 1), Right, (0, 2), "Move 2 cannibals to right"),
        ((3, 2), Left, (0, 1), "Move 1 cannibal to left"),
        ((3, 0), Right, (0, 3), "Move 2 cannibals to right"),
        ((3, 1), Left, (0, 2), "Move 1 cannibal to left"),
        ((1, 1), Right, (2, 2), "Move 2 missionaries to right"),
        ((2, 2), Left, (1, 1), "Move 1 missionary & 1 cannibal to left"),
        ((0, 2), Right, (3, 1), "Move 2 missionaries to right"),
        ((0, 3), Left, (3, 0), "Move 1 cannibal to left"),
        ((0, 1), Right, (3, 2), "Move 2 cannibals to right"),
        ((0, 2), Left, (3, 1), "Move 1 cannibal to left"),
        ((0, 0), Right, (3, 3), "Move 2 cannibals to right"),
    ];

    rows.into_iter()
        .map(|(left, boat, right, label)| {
            ScriptEntry::new(
                Bank::new(left.0, left.1),
                boat,
                Bank::new(right.0, right.1),
                label,
            )
        })
        .collect()
}
