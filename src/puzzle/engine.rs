//! Rules of the river crossing.
//!
//! The engine is pure: it validates a boat load against a state, produces
//! the successor state and classifies positions. It owns no timers and never
//! mutates the state it is given.

use crate::config::PuzzleConfig;
use crate::core::State;
use crate::puzzle::error::{IllegalReason, PuzzleError};
use crate::puzzle::moves::{Move, Selection};
use crate::puzzle::state::{Bank, BoatSide, Position, PuzzleState, Status};
use tracing::{debug, info, instrument};

/// Classify a position from its bank counts.
///
/// `Ready` is only reported for a position with no crossings made yet;
/// otherwise the crossing count plays no part.
pub fn classify(position: &Position) -> Status {
    if position.left.is_empty() {
        Status::Victory
    } else if !position.left.is_safe() || !position.right.is_safe() {
        Status::Violated
    } else if position.move_count == 0 {
        Status::Ready
    } else {
        Status::Safe
    }
}

/// Move validation and application for one puzzle configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Engine {
    config: PuzzleConfig,
}

impl Engine {
    pub fn new(config: PuzzleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// Everybody on the left bank, boat on the left, no crossings.
    pub fn initial_position(&self) -> Position {
        let mut position = Position {
            left: Bank::new(self.config.total_missionaries, self.config.total_cannibals),
            right: Bank::EMPTY,
            boat: BoatSide::Left,
            move_count: 0,
            status: Status::Ready,
        };
        position.status = classify(&position);
        position
    }

    pub fn initial_state(&self) -> PuzzleState {
        PuzzleState::from_position(self.initial_position())
    }

    /// State with `left` on the left bank and everybody else on the right.
    ///
    /// Returns `None` if `left` holds more units than the puzzle has.
    pub fn arrange(&self, left: Bank, boat: BoatSide, move_count: u32) -> Option<PuzzleState> {
        let right = Bank {
            missionaries: self.config.total_missionaries.checked_sub(left.missionaries)?,
            cannibals: self.config.total_cannibals.checked_sub(left.cannibals)?,
        };
        let mut position = Position {
            left,
            right,
            boat,
            move_count,
            status: Status::Safe,
        };
        position.status = classify(&position);
        Some(PuzzleState::from_position(position))
    }

    /// Fresh passenger picker for the bank holding the boat.
    pub fn selection(&self, state: &PuzzleState) -> Selection {
        Selection::new(
            state.position().bank(state.boat()),
            self.config.boat_capacity,
        )
    }

    pub fn classify(&self, position: &Position) -> Status {
        classify(position)
    }

    /// Check a load against the boat capacity, the supply on the boat's
    /// bank and the safety of both banks afterwards, in that order.
    pub fn check(&self, state: &PuzzleState, mv: Move) -> Result<(), IllegalReason> {
        self.check_position(state.position(), mv).map(|_| ())
    }

    pub fn is_legal(&self, state: &PuzzleState, mv: Move) -> bool {
        self.check(state, mv).is_ok()
    }

    /// Validate `mv` from `position` and return the position it leads to.
    pub(crate) fn check_position(
        &self,
        position: &Position,
        mv: Move,
    ) -> Result<Position, IllegalReason> {
        let next = self.load(position, mv)?;

        if !next.left.is_safe() {
            return Err(IllegalReason::Unsafe {
                side: BoatSide::Left,
            });
        }
        if !next.right.is_safe() {
            return Err(IllegalReason::Unsafe {
                side: BoatSide::Right,
            });
        }
        Ok(next)
    }

    /// Capacity and supply checks shared by `apply` and `force`.
    fn load(&self, position: &Position, mv: Move) -> Result<Position, IllegalReason> {
        if mv.is_empty() {
            return Err(IllegalReason::EmptyBoat);
        }
        if mv.passengers() > self.config.boat_capacity {
            return Err(IllegalReason::OverCapacity {
                passengers: mv.passengers(),
                capacity: self.config.boat_capacity,
            });
        }
        cross(position, mv).ok_or(IllegalReason::Unavailable {
            side: position.boat,
        })
    }

    /// Produce the state after `mv`.
    ///
    /// Terminal states refuse every move. The input state is never touched;
    /// it becomes the last entry of the returned state's history.
    #[instrument(skip_all, fields(mv = %mv, boat = %state.boat(), moves = state.move_count()))]
    pub fn apply(&self, state: &PuzzleState, mv: Move) -> Result<PuzzleState, PuzzleError> {
        if state.is_terminal() {
            debug!(status = %state.status(), "move refused in terminal state");
            return Err(PuzzleError::TerminalState {
                status: state.status(),
            });
        }

        let next = self.check_position(state.position(), mv).map_err(|reason| {
            debug!(%reason, "illegal move");
            PuzzleError::IllegalMove { mv, reason }
        })?;

        if next.is_final() {
            info!(status = %next.status, moves = next.move_count, "puzzle ended");
        }
        Ok(state.advance(next))
    }

    /// Apply a load without the prospective safety check.
    ///
    /// Capacity and supply are still enforced, but the result may be
    /// `Violated`. This is the free-play path where a player is allowed to lose.
    #[instrument(skip_all, fields(mv = %mv, boat = %state.boat(), moves = state.move_count()))]
    pub fn force(&self, state: &PuzzleState, mv: Move) -> Result<PuzzleState, PuzzleError> {
        if state.is_terminal() {
            return Err(PuzzleError::TerminalState {
                status: state.status(),
            });
        }
        let next = self
            .load(state.position(), mv)
            .map_err(|reason| PuzzleError::IllegalMove { mv, reason })?;

        if next.is_final() {
            info!(status = %next.status, moves = next.move_count, "puzzle ended");
        }
        Ok(state.advance(next))
    }

    /// Every legal load from the current state, smallest loads first.
    pub fn legal_moves(&self, state: &PuzzleState) -> Vec<Move> {
        let capacity = self.config.boat_capacity;
        let mut moves = Vec::new();
        for passengers in 1..=capacity {
            for missionaries in (0..=passengers).rev() {
                let mv = Move::new(missionaries, passengers - missionaries);
                if self.is_legal(state, mv) {
                    moves.push(mv);
                }
            }
        }
        moves
    }
}

/// Hypothetical position after `mv`, or `None` if the boat's bank cannot supply it
/// or the arrival bank would overflow.
fn cross(position: &Position, mv: Move) -> Option<Position> {
    let from = position.boat;
    let to = from.opposite();
    let departed = position.bank(from).without(mv)?;
    let arrived = position.bank(to).with(mv)?;

    let (left, right) = match from {
        BoatSide::Left => (departed, arrived),
        BoatSide::Right => (arrived, departed),
    };
    let mut next = Position {
        left,
        right,
        boat: to,
        move_count: position.move_count.saturating_add(1),
        status: Status::Safe,
    };
    next.status = classify(&next);
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PuzzleConfigBuilder;

    fn state_at(left: (u32, u32), boat: BoatSide, right: (u32, u32)) -> PuzzleState {
        let mut position = Position {
            left: Bank::new(left.0, left.1),
            right: Bank::new(right.0, right.1),
            boat,
            move_count: 1,
            status: Status::Safe,
        };
        position.status = classify(&position);
        PuzzleState::from_position(position)
    }

    #[test]
    fn initial_state_is_ready() {
        let state = Engine::default().initial_state();
        assert_eq!(state.left(), Bank::new(3, 3));
        assert_eq!(state.right(), Bank::EMPTY);
        assert_eq!(state.boat(), BoatSide::Left);
        assert_eq!(state.status(), Status::Ready);
        assert!(state.history().is_empty());
    }

    #[test]
    fn capacity_is_checked_first() {
        let engine = Engine::default();
        let state = engine.initial_state();

        assert_eq!(engine.check(&state, Move::new(0, 0)), Err(IllegalReason::EmptyBoat));
        assert_eq!(
            engine.check(&state, Move::new(2, 1)),
            Err(IllegalReason::OverCapacity {
                passengers: 3,
                capacity: 2
            })
        );
    }

    #[test]
    fn availability_is_checked_on_boat_side() {
        let engine = Engine::default();
        let state = state_at((3, 1), BoatSide::Right, (0, 2));

        assert_eq!(
            engine.check(&state, Move::new(1, 0)),
            Err(IllegalReason::Unavailable {
                side: BoatSide::Right
            })
        );
        assert!(engine.is_legal(&state, Move::new(0, 1)));
    }

    #[test]
    fn unsafe_left_bank_is_rejected() {
        let engine = Engine::default();
        let state = engine.initial_state();

        assert_eq!(
            engine.check(&state, Move::new(1, 0)),
            Err(IllegalReason::Unsafe {
                side: BoatSide::Left
            })
        );
    }

    #[test]
    fn unsafe_right_bank_is_rejected() {
        let engine = Engine::default();
        // one more cannibal on the right outnumbers its lone missionary
        let state = state_at((2, 2), BoatSide::Left, (1, 1));

        assert_eq!(
            engine.check(&state, Move::new(0, 1)),
            Err(IllegalReason::Unsafe {
                side: BoatSide::Right
            })
        );
    }

    #[test]
    fn bank_without_missionaries_never_blocks() {
        let engine = Engine::default();
        let state = state_at((3, 1), BoatSide::Left, (0, 2));

        assert!(engine.is_legal(&state, Move::new(0, 1)));
    }

    #[test]
    fn apply_moves_units_and_flips_boat() {
        let engine = Engine::default();
        let state = engine.initial_state();

        let next = engine.apply(&state, Move::new(0, 2)).unwrap();

        assert_eq!(next.left(), Bank::new(3, 1));
        assert_eq!(next.right(), Bank::new(0, 2));
        assert_eq!(next.boat(), BoatSide::Right);
        assert_eq!(next.move_count(), 1);
        assert_eq!(next.status(), Status::Safe);
        assert_eq!(next.prior_positions(), vec![state.position()]);
        assert_eq!(state.move_count(), 0);
    }

    #[test]
    fn apply_refuses_illegal_move() {
        let engine = Engine::default();
        let state = engine.initial_state();

        let err = engine.apply(&state, Move::new(1, 0)).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::IllegalMove {
                mv: Move::new(1, 0),
                reason: IllegalReason::Unsafe {
                    side: BoatSide::Left
                }
            }
        );
    }

    #[test]
    fn apply_refuses_terminal_states() {
        let engine = Engine::default();
        let won = state_at((0, 0), BoatSide::Right, (3, 3));
        let lost = state_at((2, 0), BoatSide::Right, (1, 3));

        assert_eq!(
            engine.apply(&won, Move::new(0, 1)).unwrap_err(),
            PuzzleError::TerminalState {
                status: Status::Victory
            }
        );
        assert_eq!(
            engine.apply(&lost, Move::new(0, 1)).unwrap_err(),
            PuzzleError::TerminalState {
                status: Status::Violated
            }
        );
    }

    #[test]
    fn force_can_reach_violation() {
        let engine = Engine::default();
        let state = engine.initial_state();

        let lost = engine.force(&state, Move::new(1, 0)).unwrap();
        assert_eq!(lost.status(), Status::Violated);
        assert_eq!(lost.left(), Bank::new(2, 3));
        assert!(engine.force(&lost, Move::new(1, 0)).is_err());
    }

    #[test]
    fn force_still_checks_capacity_and_supply() {
        let engine = Engine::default();
        let state = engine.arrange(Bank::new(3, 1), BoatSide::Right, 1).unwrap();

        assert!(matches!(
            engine.force(&state, Move::new(0, 3)),
            Err(PuzzleError::IllegalMove {
                reason: IllegalReason::OverCapacity { .. },
                ..
            })
        ));
        assert!(matches!(
            engine.force(&state, Move::new(1, 0)),
            Err(PuzzleError::IllegalMove {
                reason: IllegalReason::Unavailable { .. },
                ..
            })
        ));
    }

    #[test]
    fn arrange_conserves_units() {
        let engine = Engine::default();
        let state = engine.arrange(Bank::new(1, 2), BoatSide::Left, 4).unwrap();

        assert_eq!(state.right(), Bank::new(2, 1));
        assert_eq!(state.status(), Status::Violated);
        assert!(engine.arrange(Bank::new(4, 0), BoatSide::Left, 0).is_none());
    }

    #[test]
    fn classify_is_a_function_of_banks() {
        let engine = Engine::default();
        let won = state_at((0, 0), BoatSide::Right, (3, 3));
        let lost = state_at((2, 0), BoatSide::Left, (1, 3));
        let fine = state_at((3, 1), BoatSide::Right, (0, 2));

        assert_eq!(engine.classify(won.position()), Status::Victory);
        assert_eq!(engine.classify(lost.position()), Status::Violated);
        assert_eq!(engine.classify(fine.position()), Status::Safe);
        assert_eq!(
            engine.classify(&engine.initial_position()),
            Status::Ready
        );
    }

    #[test]
    fn legal_moves_from_start() {
        let engine = Engine::default();
        let moves = engine.legal_moves(&engine.initial_state());
        assert_eq!(
            moves,
            vec![Move::new(0, 1), Move::new(1, 1), Move::new(0, 2)]
        );
    }

    #[test]
    fn larger_boat_allows_larger_loads() {
        let config = PuzzleConfigBuilder::new()
            .missionaries(5)
            .cannibals(5)
            .capacity(3)
            .build()
            .unwrap();
        let engine = Engine::new(config);
        let state = engine.initial_state();

        assert!(engine.is_legal(&state, Move::new(0, 3)));
        assert!(!engine.is_legal(&state, Move::new(0, 4)));
    }

    #[test]
    fn selection_tracks_boat_bank() {
        let engine = Engine::default();
        let state = state_at((3, 1), BoatSide::Right, (0, 2));
        let mut selection = engine.selection(&state);

        assert!(!selection.can_add_missionary());
        assert!(selection.add_cannibal());
        assert!(engine.is_legal(&state, selection.as_move()));
    }

    #[test]
    fn oversized_loads_are_illegal() {
        let engine = Engine::default();
        let state = engine.initial_state();
        let mv = Move::new(u32::MAX, 1);

        assert!(!engine.is_legal(&state, mv));
        assert_eq!(
            engine.check(&state, mv),
            Err(IllegalReason::OverCapacity {
                passengers: u32::MAX,
                capacity: 2,
            })
        );
        assert!(matches!(
            engine.force(&state, Move::new(u32::MAX, u32::MAX)),
            Err(PuzzleError::IllegalMove { .. })
        ));
    }

    #[test]
    fn move_count_saturates() {
        let engine = Engine::default();
        let state = engine
            .arrange(Bank::new(3, 3), BoatSide::Left, u32::MAX)
            .unwrap();

        let next = engine.apply(&state, Move::new(0, 2)).unwrap();
        assert_eq!(next.move_count(), u32::MAX);
        assert_eq!(next.status(), Status::Safe);
    }
}
