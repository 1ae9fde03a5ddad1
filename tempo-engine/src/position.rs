//! Reference position oracle backed by the `chess` crate.
//!
//! `chess::Board` is a stateless, copy-make board: applying a move produces a
//! new board and no history is kept. [`Position`] wraps it with the state the
//! oracle contract requires: an undo stack realizing strict LIFO make/undo,
//! a halfmove clock for the fifty-move rule, and the hash trail needed for
//! repetition detection. The search core only ever sees the mutate-and-restore
//! interface of [`PositionOracle`].

use std::str::FromStr;

use chess::{BitBoard, Board, BoardStatus, ChessMove, MoveGen, EMPTY};

use crate::coretypes::{Color, Move, PieceKind, Square, SquareMask};
use crate::error::{self, ErrorKind};
use crate::movelist::MoveList;
use crate::oracle::PositionOracle;

/// Restore point for one applied move or skipped turn.
#[derive(Debug, Copy, Clone)]
struct Frame {
    board: Board,
    halfmove_clock: u16,
}

/// A playable chess position with make/undo history.
#[derive(Debug, Clone)]
pub struct Position {
    board: Board,
    stack: Vec<Frame>,
    halfmove_clock: u16,
}

impl Position {
    /// Returns the standard chess starting position.
    pub fn start_position() -> Self {
        Self {
            board: Board::default(),
            stack: Vec::new(),
            halfmove_clock: 0,
        }
    }

    /// Parses a position from a FEN string.
    ///
    /// `chess::Board` discards the halfmove clock field, so it is re-parsed
    /// here to keep fifty-move accounting correct.
    pub fn parse_fen(fen: &str) -> error::Result<Self> {
        let board = Board::from_str(fen).map_err(|err| error::Error::from((ErrorKind::Fen, err)))?;
        let halfmove_clock = fen
            .split_whitespace()
            .nth(4)
            .and_then(|field| field.parse().ok())
            .unwrap_or(0);

        Ok(Self {
            board,
            stack: Vec::new(),
            halfmove_clock,
        })
    }

    /// Number of plies since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    /// Converts an engine move into a `chess` crate move.
    fn to_chess_move(move_: Move) -> ChessMove {
        ChessMove::new(
            chess::ALL_SQUARES[move_.from.idx()],
            chess::ALL_SQUARES[move_.to.idx()],
            move_.promotion.map(to_chess_piece),
        )
    }

    /// Converts a `chess` crate move into an engine move, with its capture
    /// flag resolved against this position.
    fn from_chess_move(&self, chess_move: ChessMove) -> Move {
        let source = chess_move.get_source();
        let dest = chess_move.get_dest();

        // A pawn stepping diagonally onto an empty square is an en-passant capture.
        let is_capture = self.board.piece_on(dest).is_some()
            || (self.board.piece_on(source) == Some(chess::Piece::Pawn)
                && source.get_file() != dest.get_file());

        Move {
            from: from_chess_square(source),
            to: from_chess_square(dest),
            promotion: chess_move.get_promotion().map(from_chess_piece),
            is_capture,
        }
    }

    /// Mask of destination squares holding capturable enemy pieces, including
    /// the en-passant destination if one exists.
    fn capture_targets(&self) -> BitBoard {
        let mut targets = *self.board.color_combined(!self.board.side_to_move());
        if let Some(ep_pawn) = self.board.en_passant() {
            targets |= BitBoard::from_square(ep_pawn.uforward(self.board.side_to_move()));
        }
        targets
    }

    /// Counts how many positions in the reversible history share `hash`.
    fn repetitions_of(&self, hash: u64) -> usize {
        self.stack
            .iter()
            .rev()
            .take(self.halfmove_clock as usize)
            .filter(|frame| frame.board.get_hash() == hash)
            .count()
    }

    /// King versus king, or king and one minor piece versus king.
    fn is_insufficient_material(&self) -> bool {
        let heavy_or_pawn = *self.board.pieces(chess::Piece::Pawn)
            | *self.board.pieces(chess::Piece::Rook)
            | *self.board.pieces(chess::Piece::Queen);

        heavy_or_pawn == EMPTY && self.board.combined().popcnt() <= 3
    }
}

impl PositionOracle for Position {
    fn legal_moves(&self, captures_only: bool) -> MoveList {
        let mut movegen = MoveGen::new_legal(&self.board);
        if captures_only {
            movegen.set_iterator_mask(self.capture_targets());
        }
        movegen
            .map(|chess_move| self.from_chess_move(chess_move))
            .collect()
    }

    fn make_move(&mut self, move_: Move) -> bool {
        let chess_move = Self::to_chess_move(move_);
        let moved_pawn = self.board.piece_on(chess_move.get_source()) == Some(chess::Piece::Pawn);

        self.stack.push(Frame {
            board: self.board,
            halfmove_clock: self.halfmove_clock,
        });
        self.board = self.board.make_move_new(chess_move);
        self.halfmove_clock = if move_.is_capture || moved_pawn {
            0
        } else {
            self.halfmove_clock + 1
        };

        *self.board.checkers() != EMPTY
    }

    fn undo_move(&mut self, _move: Move) {
        let frame = self
            .stack
            .pop()
            .expect("undo_move called without a matching make_move");
        self.board = frame.board;
        self.halfmove_clock = frame.halfmove_clock;
    }

    fn skip_turn(&mut self) {
        debug_assert!(!self.in_check(), "cannot pass the turn while in check");
        self.stack.push(Frame {
            board: self.board,
            halfmove_clock: self.halfmove_clock,
        });
        if let Some(passed) = self.board.null_move() {
            self.board = passed;
        }
    }

    fn undo_skip_turn(&mut self) {
        let frame = self
            .stack
            .pop()
            .expect("undo_skip_turn called without a matching skip_turn");
        self.board = frame.board;
        self.halfmove_clock = frame.halfmove_clock;
    }

    fn in_check(&self) -> bool {
        *self.board.checkers() != EMPTY
    }

    fn is_checkmate(&self) -> bool {
        self.board.status() == BoardStatus::Checkmate
    }

    fn is_draw(&self) -> bool {
        self.board.status() == BoardStatus::Stalemate
            || self.halfmove_clock >= 100
            || self.is_insufficient_material()
            || self.repetitions_of(self.board.get_hash()) >= 2
    }

    fn hash_key(&self) -> u64 {
        self.board.get_hash()
    }

    fn side_to_move(&self) -> Color {
        from_chess_color(self.board.side_to_move())
    }

    fn piece_mask(&self, piece_kind: PieceKind, color: Color) -> SquareMask {
        let pieces = *self.board.pieces(to_chess_piece(piece_kind))
            & *self.board.color_combined(to_chess_color(color));
        pieces.0
    }

    fn attack_mask(&self, piece_kind: PieceKind, color: Color) -> SquareMask {
        let blockers = *self.board.combined();
        let chess_color = to_chess_color(color);
        let pieces = *self.board.pieces(to_chess_piece(piece_kind))
            & *self.board.color_combined(chess_color);

        let mut attacks = EMPTY;
        for square in pieces {
            attacks |= match piece_kind {
                PieceKind::Pawn => chess::get_pawn_attacks(square, chess_color, !EMPTY),
                PieceKind::Knight => chess::get_knight_moves(square),
                PieceKind::Bishop => chess::get_bishop_moves(square, blockers),
                PieceKind::Rook => chess::get_rook_moves(square, blockers),
                PieceKind::Queen => {
                    chess::get_bishop_moves(square, blockers)
                        | chess::get_rook_moves(square, blockers)
                }
                PieceKind::King => chess::get_king_moves(square),
            };
        }
        attacks.0
    }

    fn king_square(&self, color: Color) -> Square {
        from_chess_square(self.board.king_square(to_chess_color(color)))
    }

    fn is_square_attacked_by_opponent(&self, square: Square) -> bool {
        let opponent = self.side_to_move().other();
        let square_mask = square.shift();
        PieceKind::iter()
            .any(|piece_kind| self.attack_mask(piece_kind, opponent) & square_mask != 0)
    }
}

const fn to_chess_color(color: Color) -> chess::Color {
    match color {
        Color::White => chess::Color::White,
        Color::Black => chess::Color::Black,
    }
}

const fn from_chess_color(color: chess::Color) -> Color {
    match color {
        chess::Color::White => Color::White,
        chess::Color::Black => Color::Black,
    }
}

const fn to_chess_piece(piece_kind: PieceKind) -> chess::Piece {
    match piece_kind {
        PieceKind::Pawn => chess::Piece::Pawn,
        PieceKind::Knight => chess::Piece::Knight,
        PieceKind::Bishop => chess::Piece::Bishop,
        PieceKind::Rook => chess::Piece::Rook,
        PieceKind::Queen => chess::Piece::Queen,
        PieceKind::King => chess::Piece::King,
    }
}

const fn from_chess_piece(piece: chess::Piece) -> PieceKind {
    match piece {
        chess::Piece::Pawn => PieceKind::Pawn,
        chess::Piece::Knight => PieceKind::Knight,
        chess::Piece::Bishop => PieceKind::Bishop,
        chess::Piece::Rook => PieceKind::Rook,
        chess::Piece::Queen => PieceKind::Queen,
        chess::Piece::King => PieceKind::King,
    }
}

fn from_chess_square(square: chess::Square) -> Square {
    Square::from_idx(square.to_int()).expect("chess square index in 0..64")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::Square::*;

    #[test]
    fn start_position_has_twenty_moves() {
        let pos = Position::start_position();
        assert_eq!(pos.legal_moves(false).len(), 20);
        assert_eq!(pos.legal_moves(true).len(), 0);
        assert_eq!(pos.side_to_move(), Color::White);
    }

    #[test]
    fn malformed_fen_is_rejected() {
        let result = Position::parse_fen("not a fen at all");
        let message = result.err().map(|err| err.to_string()).unwrap_or_default();
        assert!(message.starts_with("fen malformed"), "got: {}", message);
    }

    #[test]
    fn make_undo_restores_hash_and_clock() {
        let mut pos = Position::start_position();
        let hash = pos.hash_key();
        let clock = pos.halfmove_clock();

        let move_ = Move::new(G1, F3, None);
        pos.make_move(move_);
        assert_ne!(pos.hash_key(), hash);
        pos.undo_move(move_);

        assert_eq!(pos.hash_key(), hash);
        assert_eq!(pos.halfmove_clock(), clock);
    }

    #[test]
    fn make_move_reports_check() {
        // 1. e4 e5 2. Qh5 Nc6 3. Qxf7+ is check.
        let mut pos =
            Position::parse_fen("r1bqkbnr/pppp1ppp/2n5/4p2Q/4P3/8/PPPP1PPP/RNB1KBNR w KQkq - 4 3")
                .unwrap();
        let capture = Move::new_capture(H5, F7, None);
        assert!(pos.make_move(capture));
        assert!(pos.in_check());
    }

    #[test]
    fn pawn_moves_and_captures_reset_halfmove_clock() {
        let mut pos =
            Position::parse_fen("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 6 4")
                .unwrap();
        assert_eq!(pos.halfmove_clock(), 6);

        pos.make_move(Move::new(G1, F3, None));
        assert_eq!(pos.halfmove_clock(), 7);

        pos.make_move(Move::new(D7, D6, None));
        assert_eq!(pos.halfmove_clock(), 0);
    }

    #[test]
    fn fifty_move_rule_is_draw() {
        let pos = Position::parse_fen("8/5k2/8/8/8/8/3K4/3R4 w - - 100 80").unwrap();
        assert!(pos.is_draw());
    }

    #[test]
    fn bare_kings_are_draw() {
        let pos = Position::parse_fen("8/5k2/8/8/8/8/3K4/8 w - - 0 80").unwrap();
        assert!(pos.is_draw());

        let pos = Position::parse_fen("8/5k2/8/8/8/8/3KB3/8 w - - 0 80").unwrap();
        assert!(pos.is_draw());

        let pos = Position::parse_fen("8/5k2/8/8/8/8/3KR3/8 w - - 0 80").unwrap();
        assert!(!pos.is_draw());
    }

    #[test]
    fn threefold_repetition_is_draw() {
        let mut pos = Position::start_position();
        let shuffle = [
            Move::new(G1, F3, None),
            Move::new(G8, F6, None),
            Move::new(F3, G1, None),
            Move::new(F6, G8, None),
        ];

        // Two full knight shuffles reach the start position for the third time.
        for _ in 0..2 {
            for move_ in shuffle {
                assert!(!pos.is_draw());
                pos.make_move(move_);
            }
        }
        assert!(pos.is_draw());
    }

    #[test]
    fn skip_turn_round_trip() {
        let mut pos = Position::start_position();
        let hash = pos.hash_key();

        pos.skip_turn();
        assert_eq!(pos.side_to_move(), Color::Black);
        pos.undo_skip_turn();

        assert_eq!(pos.hash_key(), hash);
        assert_eq!(pos.side_to_move(), Color::White);
    }

    #[test]
    fn en_passant_counts_as_capture_target() {
        // After 1. e4 d5 2. e5 f5, exf6 en passant is available.
        let pos =
            Position::parse_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .unwrap();
        let captures = pos.legal_moves(true);
        assert!(captures.contains(&Move::new_capture(E5, F6, None)));
    }

    #[test]
    fn checkmate_status() {
        // Fool's mate.
        let pos =
            Position::parse_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert!(pos.is_checkmate());
        assert!(pos.in_check());
        assert_eq!(pos.legal_moves(false).len(), 0);
    }

    #[test]
    fn attack_masks_start_position() {
        let pos = Position::start_position();
        // From their home squares the knights attack a3, c3, d2, e2, f3, h3,
        // and d2/e2 are occupied by friendly pawns but still attacked.
        let knights = pos.attack_mask(PieceKind::Knight, Color::White);
        assert_eq!(knights.count_ones(), 6);
        assert_eq!(pos.piece_count(PieceKind::Pawn, Color::White), 8);
        assert_eq!(pos.king_square(Color::Black), E8);
    }
}
