//! Move selection contract tests.
//!
//! The selector must always return a legal move when one exists, the
//! `Move::NONE` sentinel when none does, and must commit to the deepest
//! fully completed iteration even on an exhausted budget.

use std::time::Duration;

use tempo_engine::coretypes::Move;
use tempo_engine::evaluation::Cp;
use tempo_engine::oracle::PositionOracle;
use tempo_engine::search::select_move;
use tempo_engine::timeman::Mode;
use tempo_engine::Position;

#[test]
fn selected_move_is_always_legal() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1",
        "7k/8/8/8/8/8/q7/7K w - - 0 1",
    ];

    for fen in fens {
        let mut pos = Position::parse_fen(fen).unwrap();
        let result = select_move(&mut pos, Mode::depth(3));
        let legal = pos.legal_moves(false);
        assert!(
            legal.contains(&result.best_move),
            "illegal move {} for {}",
            result.best_move,
            fen
        );
    }
}

#[test]
fn depth_one_move_is_one_of_the_twenty_openers() {
    let mut pos = Position::start_position();
    let result = select_move(&mut pos, Mode::depth(1));
    let legal = pos.legal_moves(false);
    assert_eq!(legal.len(), 20);
    assert!(legal.contains(&result.best_move));
    assert_eq!(result.depth, 1);
}

#[test]
fn checkmate_returns_sentinel_and_mate_score() {
    let mut pos =
        Position::parse_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
    let result = select_move(&mut pos, Mode::depth(4));
    assert_eq!(result.best_move, Move::NONE);
    assert_eq!(result.score, -Cp::MATE);
}

#[test]
fn stalemate_returns_sentinel_and_even_score() {
    let mut pos = Position::parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    let result = select_move(&mut pos, Mode::depth(4));
    assert_eq!(result.best_move, Move::NONE);
    assert_eq!(result.score, Cp(0));
}

#[test]
fn exhausted_budget_still_commits_a_move() {
    let mut pos = Position::start_position();
    let result = select_move(&mut pos, Mode::movetime(Duration::ZERO));
    assert!(result.depth >= 1);
    assert!(pos.legal_moves(false).contains(&result.best_move));
}

#[test]
fn fixed_depth_mode_reaches_exactly_its_depth() {
    let mut pos = Position::start_position();
    let result = select_move(&mut pos, Mode::depth(3));
    assert_eq!(result.depth, 3);
}

#[test]
fn search_leaves_the_position_untouched() {
    let mut pos =
        Position::parse_fen("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4")
            .unwrap();
    let hash = pos.hash_key();
    let _ = select_move(&mut pos, Mode::depth(3));
    assert_eq!(pos.hash_key(), hash);
}

#[test]
fn drawn_material_scores_even() {
    // Two bare kings and a knight cannot force mate.
    let mut pos = Position::parse_fen("4k3/8/8/8/8/8/8/4KN2 w - - 0 1").unwrap();
    let result = select_move(&mut pos, Mode::depth(3));
    assert_eq!(result.score, Cp(0));
    assert!(result.best_move.is_some());
}
