//! Search functions.

mod alpha_beta;
mod ids;
mod quiescence;

pub use ids::*;
pub use quiescence::quiesce;

use std::fmt::{self, Display};
use std::time::Duration;

use crate::coretypes::{Move, PlyKind};
use crate::evaluation::Cp;

/// The results found from running a search on some root position.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move to make for a position discovered from search.
    /// `Move::NONE` when the root position has no legal move.
    pub best_move: Move,
    /// The centipawn score of making the best move, relative to the player
    /// to move at the root.
    pub score: Cp,
    /// Depth in plies of the deepest fully completed iteration.
    pub depth: PlyKind,
    /// Total number of main search nodes visited. Quiescence nodes are
    /// counted separately in `q_nodes`.
    pub nodes: u64,
    /// Total number of nodes visited in quiescence search.
    pub q_nodes: u64,
    /// Number of times a usable position entry was found in the
    /// transposition table.
    pub tt_hits: u64,
    /// Number of times a tt hit score could be used and returned immediately.
    pub tt_cuts: u64,
    /// Total time elapsed from the start to the end of a search.
    pub elapsed: Duration,
}

impl SearchResult {
    /// Get average nodes per second of search, counting both main search
    /// and quiescence nodes.
    pub fn nps(&self) -> f64 {
        ((self.nodes + self.q_nodes) as f64 / self.elapsed.as_secs_f64()).round()
    }

    /// Returns the percentage of tt hits that result in tt cuts.
    pub fn tt_cut_ratio(&self) -> f64 {
        if self.tt_hits == 0 {
            return 0.0;
        }
        self.tt_cuts as f64 / self.tt_hits as f64
    }
}

/// Note that this default does not represent any actual search.
impl Default for SearchResult {
    fn default() -> Self {
        Self {
            best_move: Move::NONE,
            score: Cp(0),
            depth: 0,
            nodes: 0,
            q_nodes: 0,
            tt_hits: 0,
            tt_cuts: 0,
            elapsed: Duration::ZERO,
        }
    }
}

impl Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "SearchResult {{")?;
        writeln!(f, "    best_move: {}", self.best_move)?;
        writeln!(f, "    score    : {}", self.score)?;
        writeln!(f, "    depth    : {}", self.depth)?;
        writeln!(f, "    nodes    : {}", self.nodes)?;
        writeln!(f, "    q_nodes  : {}", self.q_nodes)?;
        writeln!(f, "    nps      : {}", self.nps())?;
        writeln!(
            f,
            "    elapsed  : {}.{:03}s",
            self.elapsed.as_secs(),
            self.elapsed.subsec_millis()
        )?;
        writeln!(f, "    tt_hits  : {}", self.tt_hits)?;
        writeln!(f, "    tt_cuts  : {}", self.tt_cuts)?;
        write!(f, "}}")
    }
}

/// Per-session node counters, owned by one top-level search.
#[derive(Debug, Clone, Default)]
pub(crate) struct Counters {
    pub(crate) nodes: u64,
    pub(crate) q_nodes: u64,
    pub(crate) tt_hits: u64,
    pub(crate) tt_cuts: u64,
}
