//! Reference-analysis collaborator interface

use thiserror::Error;

/// Engine evaluation, relative to the side to move.
///
/// Mate scores carry the distance in plies and have no centipawn value;
/// the scorer treats them as indeterminate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Score {
    Cp(i32),
    Mate(i32),
}

impl Score {
    /// Centipawn value, `None` for mate distances
    pub fn centipawns(self) -> Option<i32> {
        match self {
            Score::Cp(cp) => Some(cp),
            Score::Mate(_) => None,
        }
    }
}

impl std::ops::Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        match self {
            Score::Cp(cp) => Score::Cp(-cp),
            Score::Mate(plies) => Score::Mate(-plies),
        }
    }
}

/// A candidate move with its evaluation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoredMove {
    /// First move of the principal variation, in UCI notation
    pub uci: String,
    pub score: Score,
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("engine i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("engine protocol: {0}")]
    Protocol(String),
}

/// Strong engine used as the measurement baseline.
///
/// Both calls are blocking, bounded operations.
pub trait Analyzer {
    /// Top `n` candidate moves for the side to move, strongest first.
    fn top_moves(&mut self, fen: &str, n: usize) -> Result<Vec<ScoredMove>, AnalysisError>;

    /// Evaluation of the position from the side to move's perspective.
    fn score(&mut self, fen: &str) -> Result<Score, AnalysisError>;
}
