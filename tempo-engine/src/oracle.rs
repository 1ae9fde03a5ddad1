//! Position oracle interface.
//!
//! The search core does not implement chess rules. Everything it needs to know
//! about the game (legal moves, check and draw status, hashing, attack maps)
//! is provided by a position oracle. The core mutates one shared oracle
//! instance through paired make/undo calls and never copies it.
//!
//! Make/undo and skip/undo-skip must be called in strict LIFO pairing:
//! every level of recursion that mutates the oracle restores it exactly once
//! before returning, on every control path. The [`with_move`] and
//! [`with_skipped_turn`] helpers enforce that pairing at the call site.

use crate::coretypes::{Color, Move, PieceKind, Square, SquareMask};
use crate::movelist::MoveList;

/// External collaborator providing chess rules, legal move generation and
/// position hashing. Implementations own the board representation; the engine
/// core only drives it.
pub trait PositionOracle {
    /// Generate legal moves for the side to move.
    /// With `captures_only`, restrict the list to capturing moves.
    fn legal_moves(&self, captures_only: bool) -> MoveList;

    /// Apply a legal move, mutating the position.
    /// Returns true if the applied move leaves the opponent in check.
    fn make_move(&mut self, move_: Move) -> bool;

    /// Restore the position to its state before the most recent `make_move`.
    fn undo_move(&mut self, move_: Move);

    /// Pass the turn without moving, for null-move pruning.
    /// Must not be called while the side to move is in check.
    fn skip_turn(&mut self);

    /// Restore the position to its state before the most recent `skip_turn`.
    fn undo_skip_turn(&mut self);

    /// Returns true if the side to move is in check.
    fn in_check(&self) -> bool;

    /// Returns true if the side to move is checkmated.
    fn is_checkmate(&self) -> bool;

    /// Returns true if the position is drawn, covering repetition,
    /// move-count and material-insufficiency draws.
    fn is_draw(&self) -> bool;

    /// 64-bit hash identifying the position, including side to move,
    /// castling rights and en-passant state. Collisions are the accepted
    /// approximation risk of transposition caching.
    fn hash_key(&self) -> u64;

    /// The player whose turn it is to move.
    fn side_to_move(&self) -> Color;

    /// Mask of squares occupied by pieces of the given kind and color.
    fn piece_mask(&self, piece_kind: PieceKind, color: Color) -> SquareMask;

    /// Number of pieces of the given kind and color.
    fn piece_count(&self, piece_kind: PieceKind, color: Color) -> u32 {
        self.piece_mask(piece_kind, color).count_ones()
    }

    /// Mask of squares attacked by pieces of the given kind and color.
    fn attack_mask(&self, piece_kind: PieceKind, color: Color) -> SquareMask;

    /// Square of the given color's king.
    fn king_square(&self, color: Color) -> Square;

    /// Returns true if the square is attacked by the opponent of the side to move.
    fn is_square_attacked_by_opponent(&self, square: Square) -> bool;
}

/// Runs `f` with `move_` applied to the oracle, then restores the oracle.
/// The closure receives the mutated oracle and whether the move gave check.
/// Undo is guaranteed on every control path out of the closure.
pub fn with_move<O, F, R>(oracle: &mut O, move_: Move, f: F) -> R
where
    O: PositionOracle + ?Sized,
    F: FnOnce(&mut O, bool) -> R,
{
    let gives_check = oracle.make_move(move_);
    let result = f(oracle, gives_check);
    oracle.undo_move(move_);
    result
}

/// Runs `f` with the turn passed to the opponent, then restores the oracle.
/// Must not be called while the side to move is in check.
pub fn with_skipped_turn<O, F, R>(oracle: &mut O, f: F) -> R
where
    O: PositionOracle + ?Sized,
    F: FnOnce(&mut O) -> R,
{
    oracle.skip_turn();
    let result = f(oracle);
    oracle.undo_skip_turn();
    result
}
