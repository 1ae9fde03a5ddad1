//! Move Ordering
//!
//! Functions used for ordering a list of moves from best to worst.
//!
//! Move ordering is important for alpha-beta pruning performance.
//! If the best or good moves are searched early on in an alpha-beta search,
//! pruning occurs more frequently.
//!
//! The ordering must be deterministic for a given position and move list.
//! Moves with equal priority keep their original relative order, so the
//! sort must be stable.

use std::cmp::Reverse;

use arrayvec::ArrayVec;

use crate::coretypes::{Move, MAX_MOVES};
use crate::movelist::MoveList;
use crate::oracle::{with_move, PositionOracle};

/// Ordering priority extracted per move. The values go from most-to-least
/// important based on top-to-bottom declaration of fields.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
struct OrderKey {
    gives_check: bool,   // Move leaves the opponent's king in check.
    escapes_check: bool, // Move is made from a position currently in check.
    is_capture: bool,    // All other moves remain with lowest, equal priority.
}

/// Reorders legal moves in place so the most promising are visited first:
/// checking moves, then check evasions, then captures, then quiet moves.
///
/// The gives-check predicate is probed with a speculative make/undo per move;
/// the position is unchanged when this returns.
pub fn order_moves<O: PositionOracle>(oracle: &mut O, moves: &mut MoveList) {
    let escapes_check = oracle.in_check();

    let mut keyed: ArrayVec<(Move, OrderKey), MAX_MOVES> = moves
        .iter()
        .map(|&move_| {
            let gives_check = with_move(oracle, move_, |_, gives_check| gives_check);
            let key = OrderKey {
                gives_check,
                escapes_check,
                is_capture: move_.is_capture,
            };
            (move_, key)
        })
        .collect();

    // Stable sort, highest priority first.
    keyed.sort_by_key(|pair| Reverse(pair.1));

    for (slot, (move_, _)) in moves.iter_mut().zip(keyed) {
        *slot = move_;
    }
}
