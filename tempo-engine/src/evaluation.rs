//! Evaluation functions that return a centipawn.
//!
//! Term functions score with White as the maxing player; [`evaluate`] converts
//! to the side-to-move perspective the negamax search expects, and layers
//! checkmate/draw detection on top of the static terms.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::coretypes::{Color, PieceKind, Square, SquareMask, NUM_SQUARES};
use crate::oracle::PositionOracle;

/// Centipawn, a common unit of measurement in chess, where 100 Centipawn == 1 Pawn.
/// A positive centipawn value represents an advantage for White,
/// and a negative value represents an advantage for Black.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Cp(pub CpKind);

// Type alias to make changing type easy if needed.
pub type CpKind = i32;

// Newtype pattern boilerplate
impl Cp {
    pub const MIN: Cp = Self(CpKind::MIN + 1); // + 1 to avoid overflow error on negate.
    pub const MAX: Cp = Self(CpKind::MAX);

    /// Score of delivering checkmate. Kept well below `Cp::MAX` so that
    /// negating and window arithmetic never overflow.
    pub const MATE: Cp = Self(Cp::MAX.0 / 2 - 1);

    pub const fn new(value: CpKind) -> Self {
        Self(value)
    }

    pub const fn signum(&self) -> CpKind {
        self.0.signum()
    }

    /// Returns the color leading for an absolute score, None if even.
    pub fn leading(&self) -> Option<Color> {
        match self.signum() {
            1 => Some(Color::White),
            -1 => Some(Color::Black),
            _ => None,
        }
    }
}

impl Add for Cp {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}
impl AddAssign for Cp {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}
impl Sub for Cp {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}
impl SubAssign for Cp {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0
    }
}
impl Mul for Cp {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}
impl Mul<CpKind> for Cp {
    type Output = Cp;
    fn mul(self, rhs: CpKind) -> Self::Output {
        Self(self.0 * rhs)
    }
}
impl Neg for Cp {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl std::fmt::Display for Cp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PieceKind {
    /// Default, color independent value per piece.
    pub const fn centipawns(&self) -> Cp {
        Cp(match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0, // Kings never come off the board.
        })
    }
}

// Term weights.
const MOBILITY_WEIGHT: Cp = Cp(2); // Per attacked square of difference.
const KING_EXPOSURE_WEIGHT: Cp = Cp(30); // Per king whose square is attacked.

/// Positional bonus per White pawn square. Index 0 is A1, rank-major.
/// Favors central advances and keeps flank pawns home.
#[rustfmt::skip]
const PAWN_SQUARE_BONUS: [CpKind; NUM_SQUARES] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10,-20,-20, 10, 10,  5,
     5, -5,-10,  0,  0,-10, -5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5,  5, 10, 25, 25, 10,  5,  5,
    10, 10, 20, 30, 30, 20, 10, 10,
    50, 50, 50, 50, 50, 50, 50, 50,
     0,  0,  0,  0,  0,  0,  0,  0,
];

/// Primary evaluate function for the engine.
/// Returns a score relative to the side to move: positive favors the player
/// whose turn it is. Checkmate and draw detection are an evaluator
/// responsibility, layered over the static terms.
pub fn evaluate<O: PositionOracle>(oracle: &O) -> Cp {
    if oracle.is_draw() {
        return Cp(0);
    }
    if oracle.is_checkmate() {
        return -Cp::MATE;
    }
    static_evaluate(oracle) * oracle.side_to_move().sign()
}

/// Sum of all static terms, with White as the maxing player.
pub fn static_evaluate<O: PositionOracle>(oracle: &O) -> Cp {
    material(oracle) + pawn_square_bonus(oracle) + mobility(oracle) + king_exposure(oracle)
}

/// Returns relative strength difference of pieces in position.
/// A positive value is an advantage for White, 0 is even.
pub fn material<O: PositionOracle>(oracle: &O) -> Cp {
    PieceKind::iter().fold(Cp::default(), |acc, piece_kind| {
        let diff = oracle.piece_count(piece_kind, Color::White) as CpKind
            - oracle.piece_count(piece_kind, Color::Black) as CpKind;
        acc + piece_kind.centipawns() * diff
    })
}

/// Returns the pawn positional bonus difference.
/// Black pawn squares are mirrored in both rank and file before lookup.
pub fn pawn_square_bonus<O: PositionOracle>(oracle: &O) -> Cp {
    let mut bonus = Cp(0);

    let mut white_pawns = oracle.piece_mask(PieceKind::Pawn, Color::White);
    while white_pawns != 0 {
        bonus += Cp(PAWN_SQUARE_BONUS[lowest_square(white_pawns).idx()]);
        white_pawns &= white_pawns - 1;
    }

    let mut black_pawns = oracle.piece_mask(PieceKind::Pawn, Color::Black);
    while black_pawns != 0 {
        bonus -= Cp(PAWN_SQUARE_BONUS[lowest_square(black_pawns).mirror().idx()]);
        black_pawns &= black_pawns - 1;
    }

    bonus
}

/// Lowest set square of a non-empty square mask.
fn lowest_square(mask: SquareMask) -> Square {
    debug_assert_ne!(mask, 0);
    Square::from_idx(mask.trailing_zeros() as u8).expect("non-empty mask has a square index")
}

/// Difference in count of squares attacked by each side's combined piece set.
pub fn mobility<O: PositionOracle>(oracle: &O) -> Cp {
    let white_attacks = combined_attack_mask(oracle, Color::White).count_ones() as CpKind;
    let black_attacks = combined_attack_mask(oracle, Color::Black).count_ones() as CpKind;
    MOBILITY_WEIGHT * (white_attacks - black_attacks)
}

/// Penalty for each king whose own square is currently attacked.
///
/// Uses conventional king-safety sign: an attacked king is bad for its owner.
pub fn king_exposure<O: PositionOracle>(oracle: &O) -> Cp {
    let side = oracle.side_to_move();
    let opponent = side.other();

    // The side to move's king is probed directly against opponent attacks;
    // the opponent's king is checked against the mover's combined attack map.
    let own_exposed = oracle.is_square_attacked_by_opponent(oracle.king_square(side));
    let opponent_exposed =
        combined_attack_mask(oracle, side) & oracle.king_square(opponent).shift() != 0;

    let relative = opponent_exposed as CpKind - own_exposed as CpKind;
    KING_EXPOSURE_WEIGHT * relative * side.sign()
}

/// Union of the attack masks of every piece kind for one color.
fn combined_attack_mask<O: PositionOracle>(oracle: &O, color: Color) -> SquareMask {
    PieceKind::iter().fold(0, |acc, piece_kind| acc | oracle.attack_mask(piece_kind, color))
}
