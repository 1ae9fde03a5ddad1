//! Engine struct acts as a simplified API for the various parts of the engine.

use std::time::Duration;

use crate::coretypes::Move;
use crate::oracle::PositionOracle;
use crate::search::{self, SearchResult};
use crate::timeman::Mode;
use crate::transposition::TranspositionTable;

/// EngineBuilder allows for parameters of an Engine to be set and built once,
/// avoiding repeating costly initialization steps of making then changing an Engine.
///
/// Default values:
///
/// * `transpositions_mb`: 1 megabyte
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EngineBuilder {
    transpositions_mb: usize,
}

impl EngineBuilder {
    /// Create a new default EngineBuilder.
    pub fn new() -> Self {
        Self {
            transpositions_mb: 1,
        }
    }

    /// Create and return a new Engine.
    pub fn build(&self) -> Engine {
        Engine {
            tt: TranspositionTable::with_mb(self.transpositions_mb),
        }
    }

    /// Set the engine's transposition table size in megabytes.
    pub fn transpositions_mb(mut self, transpositions_mb: usize) -> Self {
        self.transpositions_mb = transpositions_mb;
        self
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Engine holds the reusable resources of a search, currently the
/// transposition table allocation. Game state lives in the caller's
/// oracle, which is borrowed for the duration of one selection.
pub struct Engine {
    tt: TranspositionTable,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            tt: TranspositionTable::new(),
        }
    }

    /// Returns reference to engine's transposition table.
    pub fn transposition_table(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Selects a move for the side to move, allocating a slice of the
    /// caller's remaining game time to this turn.
    /// Returns `Move::NONE` when the position has no legal move.
    pub fn select_move<O: PositionOracle>(&mut self, oracle: &mut O, remaining: Duration) -> Move {
        self.search(oracle, Mode::from_remaining(remaining)).best_move
    }

    /// Run a blocking search on the oracle's current position with explicit
    /// limits, returning the full result with its metrics.
    pub fn search<O: PositionOracle>(&mut self, oracle: &mut O, mode: Mode) -> SearchResult {
        search::select_move_with_tt(oracle, mode, &mut self.tt)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
