//! Transposition Table.
//!
//! A fixed-size memo of previously searched positions, keyed by the oracle's
//! position hash. One table lives for exactly one top-level search: the
//! search controller allocates it when a search starts and drops it when the
//! chosen move is committed, so stale draw/repetition context never leaks
//! between moves.
//!
//! Index collisions are resolved by always replacing. Key collisions (two
//! positions sharing a full hash) are an accepted approximation error.

use std::mem;

use crate::coretypes::PlyKind;
use crate::evaluation::Cp;

/// How a stored score relates to the true value of its position,
/// determined by where the score fell in the search window.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Bound {
    /// Score was inside the window: the exact value for that depth.
    Exact,
    /// Score failed high: the true value is at least this score.
    LowerBound,
    /// Score failed low: the true value is at most this score.
    UpperBound,
}

/// Entry contains information about a previously searched position.
///
/// An entry may only shortcut a search when `depth >= ` the depth of the
/// current query; a shallower cached result must never stand in for a
/// deeper search.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Entry {
    pub hash: u64,       // Full hash value for a position.
    pub depth: PlyKind,  // The depth searched to in this position's subtree.
    pub score: Cp,       // Score relative to the entry position's side to move.
    pub bound: Bound,    // How score relates to the true value.
}

impl Entry {
    /// Returns new Entry from provided information.
    pub fn new(hash: u64, depth: PlyKind, score: Cp, bound: Bound) -> Self {
        Self {
            hash,
            depth,
            score,
            bound,
        }
    }
}

/// Converts a size in Megabytes to a capacity.
fn mb_to_capacity(mb: usize) -> usize {
    (mb * 1_000_000) / mem::size_of::<Option<Entry>>()
}

/// A Transposition Table (tt) with a fixed size, memoizing previously
/// evaluated chess positions for the duration of one search session.
///
/// There are some notable differences in behavior between TranspositionTable
/// and std::collections::{HashMap, HashSet}:
/// index collisions are resolved by replacement, key collisions are not
/// detected, and the table never grows.
pub struct TranspositionTable {
    capacity: usize,
    slots: Vec<Option<Entry>>,
}

impl TranspositionTable {
    const DEFAULT_CAPACITY: usize = 100_000;

    /// Returns a new TranspositionTable with a pre-allocated default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Returns a new TranspositionTable with given capacity pre-allocated.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity is not greater than 0");
        Self {
            capacity,
            slots: vec![None; capacity],
        }
    }

    /// Returns a new TranspositionTable with capacity calculated to fill
    /// given Megabytes.
    pub fn with_mb(mb: usize) -> Self {
        assert!(mb > 0);
        Self::with_capacity(mb_to_capacity(mb))
    }

    /// Returns the capacity of the TranspositionTable.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes all items from the TranspositionTable.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// Convert a full hash to an index for this TranspositionTable.
    fn hash_to_index(&self, hash: u64) -> usize {
        (hash % self.capacity as u64) as usize
    }

    /// Inserts an entry, unconditionally replacing any item that already
    /// exists at the hash index.
    pub fn store(&mut self, entry: Entry) {
        let index = self.hash_to_index(entry.hash);
        self.slots[index] = Some(entry);
    }

    /// Returns the Entry stored for `hash`, None otherwise.
    /// The caller is responsible for trusting the entry only when its stored
    /// depth covers the depth of the current query.
    pub fn get(&self, hash: u64) -> Option<Entry> {
        let index = self.hash_to_index(hash);
        self.slots[index].filter(|entry| entry.hash == hash)
    }

    /// Returns true if TranspositionTable contains a given hash.
    pub fn contains(&self, hash: u64) -> bool {
        self.get(hash).is_some()
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
