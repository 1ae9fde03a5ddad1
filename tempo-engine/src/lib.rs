pub mod coretypes;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod movelist;
pub mod moveorder;
pub mod oracle;
pub mod position;
pub mod search;
pub mod timeman;
pub mod transposition;

pub use engine::{Engine, EngineBuilder};
pub use oracle::PositionOracle;
pub use position::Position;
pub use transposition::TranspositionTable;
