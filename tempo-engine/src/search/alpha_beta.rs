//! Negamax implementation of Minimax with Alpha-Beta pruning.
//!
//! The player whose turn it is to move is always treated as the maxing
//! player, so the score of a child node is negated before it is combined
//! into its parent.
//!
//! Pruning changes only which branches are visited, never the value
//! returned for the root window. For any fixed depth the result must equal
//! what an unpruned full-window negamax would return.

use crate::coretypes::{Move, PieceKind, PlyKind};
use crate::evaluation::{evaluate, Cp};
use crate::moveorder::order_moves;
use crate::oracle::{with_move, with_skipped_turn, PositionOracle};
use crate::search::quiescence::quiescence;
use crate::search::Counters;
use crate::transposition::{Bound, Entry, TranspositionTable};

/// Root search. Searches every legal root move with a full window and
/// returns the best score together with the move achieving it.
/// Returns `Move::NONE` when no legal move exists.
pub(crate) fn negamax_root<O: PositionOracle>(
    oracle: &mut O,
    tt: &mut TranspositionTable,
    depth: PlyKind,
    counters: &mut Counters,
) -> (Cp, Move) {
    debug_assert_ne!(depth, 0);
    counters.nodes += 1;

    let mut moves = oracle.legal_moves(false);
    if moves.is_empty() {
        return (evaluate(oracle), Move::NONE);
    }
    order_moves(oracle, &mut moves);

    let beta = Cp::MAX;
    let mut alpha = Cp::MIN;
    let mut best_move = moves[0];
    let mut best_score = Cp::MIN;

    for move_ in moves {
        let score = with_move(oracle, move_, |oracle, _| {
            -negamax(oracle, tt, depth - 1, -beta, -alpha, true, counters)
        });

        if score > best_score {
            best_score = score;
            best_move = move_;
        }
        alpha = alpha.max(best_score);
    }

    (best_score, best_move)
}

/// Recursive negamax search of one node.
///
/// `alpha` is the best guaranteed value for the current player, `beta` the
/// best guaranteed value for the opponent. `allow_null` grants permission to
/// try a null move at this node; it is revoked for the node directly below a
/// null move so two passes never stack.
pub(crate) fn negamax<O: PositionOracle>(
    oracle: &mut O,
    tt: &mut TranspositionTable,
    depth: PlyKind,
    mut alpha: Cp,
    mut beta: Cp,
    allow_null: bool,
    counters: &mut Counters,
) -> Cp {
    counters.nodes += 1;
    let original_alpha = alpha;
    let original_beta = beta;
    let hash = oracle.hash_key();

    // Probe the transposition table. An entry is only trusted when it was
    // searched at least as deep as this query; Exact entries answer the node
    // outright while bounds tighten the window, possibly emptying it.
    if let Some(entry) = tt.get(hash) {
        if entry.depth >= depth {
            counters.tt_hits += 1;
            match entry.bound {
                Bound::Exact => {
                    counters.tt_cuts += 1;
                    return entry.score;
                }
                Bound::LowerBound => alpha = alpha.max(entry.score),
                Bound::UpperBound => beta = beta.min(entry.score),
            }
            if alpha >= beta {
                counters.tt_cuts += 1;
                return entry.score;
            }
        }
    }

    // Terminal nodes hand off to quiescence, which scores checkmate and
    // draws through the evaluator.
    if depth == 0 || oracle.is_draw() || oracle.is_checkmate() {
        return quiescence(oracle, alpha, beta, counters);
    }

    // Null-move pruning: give the opponent a free pass and verify with a
    // reduced null-window search whether this position already fails high.
    if null_move_allowed(oracle, allow_null, depth) {
        let reduction = null_move_reduction(depth);
        let null_score = with_skipped_turn(oracle, |oracle| {
            -negamax(
                oracle,
                tt,
                depth - 1 - reduction,
                -beta,
                -beta + Cp(1),
                false,
                counters,
            )
        });
        if null_score >= beta {
            return beta;
        }
    }

    let mut moves = oracle.legal_moves(false);
    if moves.is_empty() {
        // No legal move and not terminal above: score through the evaluator.
        return evaluate(oracle);
    }
    order_moves(oracle, &mut moves);

    let mut best_score = Cp::MIN;
    for move_ in moves {
        let score = with_move(oracle, move_, |oracle, _| {
            -negamax(oracle, tt, depth - 1, -beta, -alpha, true, counters)
        });

        best_score = best_score.max(score);
        alpha = alpha.max(best_score);
        if alpha >= beta {
            // Beta cutoff, no further children can affect the result.
            break;
        }
    }

    // Classify the score against the window this node was asked about,
    // not the tightened one, and unconditionally replace any prior entry.
    let bound = if best_score <= original_alpha {
        Bound::UpperBound
    } else if best_score >= original_beta {
        Bound::LowerBound
    } else {
        Bound::Exact
    };
    tt.store(Entry::new(hash, depth, best_score, bound));

    best_score
}

/// Returns true if a null move may be attempted at a node.
/// A pass is unsound while in check (the opponent could capture the king),
/// pointless at the frontier, and unreliable in zugzwang, so the side to
/// move must also hold at least one piece besides king and pawns.
pub(crate) fn null_move_allowed<O: PositionOracle>(
    oracle: &O,
    allow_null: bool,
    depth: PlyKind,
) -> bool {
    allow_null && depth >= 2 && !oracle.in_check() && side_has_pieces(oracle)
}

/// True if the side to move has any knight, bishop, rook or queen.
fn side_has_pieces<O: PositionOracle>(oracle: &O) -> bool {
    let side = oracle.side_to_move();
    [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ]
    .into_iter()
    .any(|piece_kind| oracle.piece_mask(piece_kind, side) != 0)
}

/// Depth reduction applied below a null move.
const fn null_move_reduction(depth: PlyKind) -> PlyKind {
    if depth >= 3 {
        2
    } else {
        1
    }
}
