//! Iterative deepening move selection.
//!
//! The driver searches to depth 1, then 2, and so on. The time budget is
//! only consulted between rounds: once a depth is started it always runs to
//! completion, and the move reported is the best move of the deepest
//! completed round. Each deeper round replaces the previous answer.

use std::time::Instant;

use crate::coretypes::MAX_DEPTH;
use crate::oracle::PositionOracle;
use crate::search::alpha_beta::negamax_root;
use crate::search::{Counters, SearchResult};
use crate::timeman::Mode;
use crate::transposition::TranspositionTable;

/// Select the best move for the side to move, within the limits of `mode`.
/// Uses a locally scoped transposition table.
pub fn select_move<O: PositionOracle>(oracle: &mut O, mode: Mode) -> SearchResult {
    let mut tt = TranspositionTable::new();
    select_move_with_tt(oracle, mode, &mut tt)
}

/// Select the best move for the side to move, using a caller provided
/// transposition table. The table is cleared before searching so entries
/// never leak across searches.
pub fn select_move_with_tt<O: PositionOracle>(
    oracle: &mut O,
    mode: Mode,
    tt: &mut TranspositionTable,
) -> SearchResult {
    tt.clear();

    let start_time = Instant::now();
    let mut counters = Counters::default();
    let mut result = SearchResult::default();

    for depth in 1..=MAX_DEPTH {
        // Depth 1 always runs so a legal move is on hand even when the
        // budget is already spent.
        if depth > 1 && mode.stop(depth, start_time) {
            break;
        }

        let (score, best_move) = negamax_root(oracle, tt, depth, &mut counters);

        result.best_move = best_move;
        result.score = score;
        result.depth = depth;
        result.nodes = counters.nodes;
        result.q_nodes = counters.q_nodes;
        result.tt_hits = counters.tt_hits;
        result.tt_cuts = counters.tt_cuts;
        result.elapsed = start_time.elapsed();

        log::debug!(
            "depth {} best {} score {} nodes {} elapsed {:?}",
            result.depth,
            result.best_move,
            result.score,
            result.nodes,
            result.elapsed,
        );

        // A position with no legal moves cannot improve with depth.
        if result.best_move.is_none() {
            break;
        }
    }

    result.elapsed = start_time.elapsed();
    log::info!("{}", result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::coretypes::{Move, Square::*};
    use crate::evaluation::Cp;
    use crate::position::Position;

    #[test]
    fn depth_one_search_completes() {
        let mut pos = Position::start_position();
        let result = select_move(&mut pos, Mode::depth(1));
        assert_eq!(result.depth, 1);
        assert!(result.best_move.is_some());
        assert!(result.nodes > 0);
    }

    #[test]
    fn zero_budget_still_completes_depth_one() {
        let mut pos = Position::start_position();
        let result = select_move(&mut pos, Mode::movetime(Duration::ZERO));
        assert_eq!(result.depth, 1);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn finds_back_rank_mate() {
        let mut pos = Position::parse_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let result = select_move(&mut pos, Mode::depth(3));
        assert_eq!(result.best_move, Move::new(A1, A8, None));
        assert_eq!(result.score, Cp::MATE);
    }

    #[test]
    fn checkmated_position_reports_sentinel() {
        let mut pos =
            Position::parse_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        let result = select_move(&mut pos, Mode::depth(4));
        assert!(result.best_move.is_none());
        assert_eq!(result.score, -Cp::MATE);
        assert_eq!(result.depth, 1);
    }

    #[test]
    fn shared_table_is_cleared_between_searches() {
        let mut tt = TranspositionTable::new();
        let mut pos = Position::start_position();
        let first = select_move_with_tt(&mut pos, Mode::depth(3), &mut tt);
        let second = select_move_with_tt(&mut pos, Mode::depth(3), &mut tt);
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.score, second.score);
        assert_eq!(first.nodes, second.nodes);
    }
}
