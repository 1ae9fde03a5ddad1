//! The fundamental and simple types of `tempo_engine`.

use std::fmt::{self, Display, Write};
use std::mem::replace;
use std::mem::transmute; // unsafe

///////////////
// Constants //
///////////////
pub const NUM_FILES: usize = 8; // A, B, C, D, E, F, G, H
pub const NUM_RANKS: usize = 8; // 1, 2, 3, 4, 5, 6, 7, 8
pub const NUM_SQUARES: usize = NUM_FILES * NUM_RANKS;

// The max possible measured number of moves for any chess position.
pub const MAX_MOVES: usize = 218;

// The greatest depth reachable during search. Bounding the depth ceiling
// keeps recursion stack usage predictable.
pub const MAX_DEPTH: PlyKind = 64;

/////////////////////////
// Data and Structures //
/////////////////////////

/// Type alias for max ply/depth.
pub type PlyKind = u8;

/// Type alias for a set of squares packed into a u64, little-endian rank-file order.
pub type SquareMask = u64;

/// Color can represent the color of a piece, or a player.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Color {
    White,
    Black,
}

/// Enum variant order and discriminant are important.
/// Must be contiguous and start from 0.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Square
/// Every possible square on a chess board.
/// The order of enums is important, as `Square::A1 as u8` corresponds to
/// that Square's bit position in a square mask.
/// WARNING: The exact ordering of enums is important for their discriminants.
///          Changing the discriminant of any variant is breaking.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[rustfmt::skip]
#[repr(u8)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8 = 63u8,
}

/// Move
/// Long Algebraic form of moving a single chess piece.
/// Equivalent to a chess "half move", or "ply".
/// `Move::NONE` is a sentinel representing the absence of a legal choice.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub is_capture: bool,
}

//////////////////////
// Implementations  //
//////////////////////

impl Color {
    /// Returns the opposing color.
    pub const fn other(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns 1 for White and -1 for Black, for converting between
    /// absolute and side-relative scores.
    pub const fn sign(&self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        self.other()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

impl PieceKind {
    /// FEN compliant conversion, defaults as white pieces.
    pub const fn to_char(&self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub const fn iter() -> PieceKindIterator {
        PieceKindIterator::new()
    }
}

pub struct PieceKindIterator {
    maybe_piece_kind: Option<PieceKind>,
}

impl PieceKindIterator {
    pub const fn new() -> Self {
        Self {
            maybe_piece_kind: Some(PieceKind::Pawn),
        }
    }
}

impl Iterator for PieceKindIterator {
    type Item = PieceKind;
    fn next(&mut self) -> Option<Self::Item> {
        let value = match self.maybe_piece_kind {
            Some(PieceKind::Pawn) => Some(PieceKind::Knight),
            Some(PieceKind::Knight) => Some(PieceKind::Bishop),
            Some(PieceKind::Bishop) => Some(PieceKind::Rook),
            Some(PieceKind::Rook) => Some(PieceKind::Queen),
            Some(PieceKind::Queen) => Some(PieceKind::King),
            Some(PieceKind::King) | None => None,
        };
        replace(&mut self.maybe_piece_kind, value)
    }
}

impl Square {
    /// Returns the index of this square, between 0-63 inclusive.
    pub const fn idx(&self) -> usize {
        *self as usize
    }

    /// Returns a mask with only this square's bit set.
    pub const fn shift(&self) -> SquareMask {
        1u64 << self.idx()
    }

    /// Returns the Square for an index between 0-63, None otherwise.
    pub fn from_idx(value: u8) -> Option<Square> {
        // If value is in valid range, transmute, otherwise return None.
        (value <= Square::H8 as u8).then(|| unsafe { transmute::<u8, Square>(value) })
    }

    /// File index of square, where file A is 0 and file H is 7.
    pub const fn file_u8(&self) -> u8 {
        *self as u8 % NUM_FILES as u8
    }

    /// Rank index of square, where rank 1 is 0 and rank 8 is 7.
    pub const fn rank_u8(&self) -> u8 {
        *self as u8 / NUM_RANKS as u8
    }

    /// Returns the square reflected in both rank and file, i.e. A1 <-> H8.
    /// Used to mirror piece-square bonuses for the opposing color.
    pub fn mirror(&self) -> Square {
        Square::from_idx(Square::H8 as u8 - *self as u8).unwrap()
    }

    pub const fn iter() -> SquareIterator {
        SquareIterator { idx: 0 }
    }
}

pub struct SquareIterator {
    idx: u8,
}

impl Iterator for SquareIterator {
    type Item = Square;
    fn next(&mut self) -> Option<Self::Item> {
        let maybe_square = Square::from_idx(self.idx);
        self.idx = self.idx.saturating_add(1);
        maybe_square
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char((b'a' + self.file_u8()) as char)?;
        f.write_char((b'1' + self.rank_u8()) as char)
    }
}

impl Move {
    /// Sentinel representing no move. It is never a legal chess move.
    pub const NONE: Move = Move {
        from: Square::A1,
        to: Square::A1,
        promotion: None,
        is_capture: false,
    };

    /// Returns a new quiet or capturing Move.
    pub const fn new(from: Square, to: Square, promotion: Option<PieceKind>) -> Self {
        Self {
            from,
            to,
            promotion,
            is_capture: false,
        }
    }

    /// Returns a new Move flagged as a capture.
    pub const fn new_capture(from: Square, to: Square, promotion: Option<PieceKind>) -> Self {
        Self {
            from,
            to,
            promotion,
            is_capture: true,
        }
    }

    /// Returns true if this Move is the "no move" sentinel.
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Returns true if this Move is an actual move.
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }
}

/// Prints in UCI long algebraic notation, ex: "e2e4", "e7e8q".
impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            f.write_char(promotion.to_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}
