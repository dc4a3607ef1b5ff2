//! Move-generation backend interface

use thiserror::Error;

use crate::agent::BackendKind;

/// Transport-level backend failure. Never recovered inside a game;
/// propagates so the scheduler can abandon the game and move on.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything a backend gets to see when asked for a move.
#[derive(Clone, Copy, Debug)]
pub struct MoveRequest<'a> {
    /// Current position as FEN
    pub fen: &'a str,
    /// Legal moves in SAN, comma separated
    pub legal_moves: &'a str,
    /// Moves played so far in SAN, comma separated
    pub history: &'a str,
    /// Outcome of this agent's previous attempt; carries across plies
    /// until overwritten
    pub feedback: &'a str,
}

/// Produces candidate moves for an agent. Implementations either query
/// a remote language model or drive a local engine; either way the call
/// is opaque, possibly slow, and possibly wrong.
///
/// `propose` returns the extracted candidate move text, or `None` when
/// the response carried no recognizable move (which is not an error).
pub trait MoveBackend {
    fn kind(&self) -> BackendKind;

    fn propose(&mut self, req: &MoveRequest<'_>) -> Result<Option<String>, BackendError>;
}
