//! Pruning soundness tests.
//!
//! Alpha-beta and the transposition table reduce which branches are visited,
//! never the value of the game tree. For a fixed depth the selector must
//! return the same root score as an exhaustive full-window negamax. Null
//! move pruning first activates two plies below the root, so depths 1 and 2
//! are exercised by every pruning stage that must stay value preserving.

use tempo_engine::coretypes::PlyKind;
use tempo_engine::evaluation::Cp;
use tempo_engine::oracle::{with_move, PositionOracle};
use tempo_engine::search::{quiesce, select_move};
use tempo_engine::timeman::Mode;
use tempo_engine::Position;

/// Exhaustive negamax without any pruning. Every branch is visited with a
/// full window, with the same capture resolution at the frontier.
fn exhaustive_negamax(pos: &mut Position, depth: PlyKind, nodes: &mut u64) -> Cp {
    *nodes += 1;

    if depth == 0 || pos.is_draw() || pos.is_checkmate() {
        return quiesce(pos, Cp::MIN, Cp::MAX);
    }

    let moves = pos.legal_moves(false);
    if moves.is_empty() {
        return quiesce(pos, Cp::MIN, Cp::MAX);
    }

    let mut best = Cp::MIN;
    for move_ in moves {
        let score = with_move(pos, move_, |pos, _| {
            -exhaustive_negamax(pos, depth - 1, nodes)
        });
        best = best.max(score);
    }
    best
}

fn assert_scores_match(fen: &str, depth: PlyKind) {
    let mut pos = Position::parse_fen(fen).unwrap();
    let mut reference_nodes = 0;
    let reference = exhaustive_negamax(&mut pos, depth, &mut reference_nodes);

    let result = select_move(&mut pos, Mode::depth(depth));
    assert_eq!(
        result.score, reference,
        "pruned score diverges from exhaustive search for {} at depth {}",
        fen, depth
    );
}

#[test]
fn depth_one_matches_exhaustive_search() {
    assert_scores_match("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 1);
    assert_scores_match("4k3/2p5/8/8/8/8/2P5/4K3 b - - 0 1", 1);
}

#[test]
fn depth_two_matches_exhaustive_search() {
    assert_scores_match("4k3/2p5/8/8/8/8/2P5/4K3 w - - 0 1", 2);
    assert_scores_match("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1", 2);
    assert_scores_match("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 2);
}

#[test]
fn pruned_search_visits_no_more_nodes() {
    let mut pos =
        Position::parse_fen("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4")
            .unwrap();
    let depth = 2;

    let mut reference_nodes = 0;
    let _ = exhaustive_negamax(&mut pos, depth, &mut reference_nodes);

    let result = select_move(&mut pos, Mode::depth(depth));
    // The pruned total includes both deepening rounds, and must still come
    // in under one exhaustive pass of the target depth.
    assert!(
        result.nodes <= reference_nodes,
        "pruned {} nodes, exhaustive {}",
        result.nodes,
        reference_nodes
    );
}

#[test]
fn null_move_depths_keep_forced_mates() {
    // Ladder mate in two against a bare king. Null move pruning runs at the
    // interior nodes from depth 3 up, but the defender has no pieces, so the
    // zugzwang guard keeps it from hiding the forced line.
    let mut pos = Position::parse_fen("7k/8/8/8/8/8/R7/1R4K1 w - - 0 1").unwrap();

    let depth_3 = select_move(&mut pos, Mode::depth(3));
    assert_eq!(depth_3.score, Cp::MATE);

    let depth_4 = select_move(&mut pos, Mode::depth(4));
    assert_eq!(depth_4.score, Cp::MATE);
}
