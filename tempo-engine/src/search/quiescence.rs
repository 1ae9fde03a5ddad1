//! Quiescence search.
//!
//! Fixed-depth searches cut off in the middle of capture exchanges, so a
//! static score at the frontier sees a position that is not tactically
//! settled. Quiescence keeps searching captures only until the position
//! quiets down, taking the static stand-pat score as a floor the moving
//! player is never forced below.

use crate::evaluation::{evaluate, Cp};
use crate::moveorder::order_moves;
use crate::oracle::{with_move, PositionOracle};
use crate::search::Counters;

/// Search all capture sequences from a position to find its best quiet score.
/// Used in place of the static evaluation at frontier nodes.
pub fn quiesce<O: PositionOracle>(oracle: &mut O, alpha: Cp, beta: Cp) -> Cp {
    let mut counters = Counters::default();
    quiescence(oracle, alpha, beta, &mut counters)
}

pub(crate) fn quiescence<O: PositionOracle>(
    oracle: &mut O,
    mut alpha: Cp,
    beta: Cp,
    counters: &mut Counters,
) -> Cp {
    counters.q_nodes += 1;

    // A finished game has an exact score; captures past it are meaningless.
    if oracle.is_draw() || oracle.is_checkmate() {
        return evaluate(oracle);
    }

    // The moving player can decline every capture, so the static score
    // bounds the node from below.
    let stand_pat = evaluate(oracle);
    if stand_pat >= beta {
        return beta;
    }
    alpha = alpha.max(stand_pat);

    let mut captures = oracle.legal_moves(true);
    order_moves(oracle, &mut captures);

    for capture in captures {
        let score = with_move(oracle, capture, |oracle, _| {
            -quiescence(oracle, -beta, -alpha, counters)
        });

        if score >= beta {
            return beta;
        }
        alpha = alpha.max(score);
    }

    alpha
}
