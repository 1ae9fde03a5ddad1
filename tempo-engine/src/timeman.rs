//! Time Management
//!
//! Search limits for the iterative deepening controller. Time is only ever
//! consulted between root iterations: a started depth runs to completion, so
//! a budget can be overrun by up to the cost of one additional ply. This is
//! an accepted, bounded cost of never surfacing partial iterations.

use std::time::{Duration, Instant};

use crate::coretypes::{PlyKind, MAX_DEPTH};

/// Expected amount of time lost between deciding to stop and the caller
/// committing a move. Deepening stops once the remaining budget falls
/// below this margin.
pub const OVERHEAD: Duration = Duration::from_millis(10);

// Use 1/15th of remaining time per timed move.
const TIME_RATIO: u32 = 15;

/// Two supported search modes: Depth and MoveTime.
/// Depth mode: search until a fixed depth is completed.
/// MoveTime mode: deepen until a time budget for this move is spent.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Mode {
    /// Search to a fixed depth, regardless of time.
    Depth(PlyKind),
    /// Spend up to this much time on the move.
    MoveTime(Duration),
}

impl Mode {
    /// Returns a new Depth mode, clamped to the engine's depth ceiling.
    pub fn depth(ply: PlyKind) -> Self {
        Self::Depth(ply.min(MAX_DEPTH))
    }

    /// Returns a new MoveTime mode.
    pub fn movetime(movetime: Duration) -> Self {
        Self::MoveTime(movetime)
    }

    /// Returns a MoveTime mode allocating a slice of the caller's total
    /// remaining game time to this one move.
    pub fn from_remaining(remaining: Duration) -> Self {
        Self::MoveTime(remaining / TIME_RATIO)
    }

    /// Returns true if the iteration for `next_depth` should not be started.
    /// Consulted between iterations only.
    pub fn stop(&self, next_depth: PlyKind, start_time: Instant) -> bool {
        if next_depth > MAX_DEPTH {
            return true;
        }
        match self {
            Mode::Depth(depth) => next_depth > *depth,
            Mode::MoveTime(movetime) => is_out_of_time(start_time, *movetime),
        }
    }
}

/// Returns true if the duration since the start of search plus the stop
/// overhead meets the provided time to move.
fn is_out_of_time(start_time: Instant, movetime: Duration) -> bool {
    start_time.elapsed() + OVERHEAD >= movetime
}
