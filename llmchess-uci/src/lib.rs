//! llmchess uci - Reference engine over the UCI protocol
//!
//! Drives a UCI engine subprocess (typically Stockfish) and exposes it
//! through the analyzer interface: MultiPV candidate lists for the
//! pre-move position and single-line scores for post-move positions.

mod engine;
mod protocol;

pub use engine::{UciEngine, MULTIPV_MOVETIME_MS, SCORE_MOVETIME_MS};
pub use protocol::{parse_bestmove, parse_info_line, InfoLine};
