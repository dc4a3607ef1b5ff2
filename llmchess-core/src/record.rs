//! Finalized game records handed to persistence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agent::GameStats;
use crate::rating::PlayerResult;

/// Final result of a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameOutcome {
    /// PGN result token
    pub fn pgn(self) -> &'static str {
        match self {
            GameOutcome::WhiteWins => "1-0",
            GameOutcome::BlackWins => "0-1",
            GameOutcome::Draw => "1/2-1/2",
        }
    }

    /// Result from white's perspective
    pub fn for_white(self) -> PlayerResult {
        match self {
            GameOutcome::WhiteWins => PlayerResult::Win,
            GameOutcome::BlackWins => PlayerResult::Loss,
            GameOutcome::Draw => PlayerResult::Draw,
        }
    }

    /// Result from black's perspective
    pub fn for_black(self) -> PlayerResult {
        match self {
            GameOutcome::WhiteWins => PlayerResult::Loss,
            GameOutcome::BlackWins => PlayerResult::Win,
            GameOutcome::Draw => PlayerResult::Draw,
        }
    }
}

/// Why the game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    Checkmate,
    Stalemate,
    ThreefoldRepetition,
    FiftyMoveRule,
    InsufficientMaterial,
    SeventyFiveMoveRule,
    MoveCap,
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            TerminationReason::Checkmate => "checkmate",
            TerminationReason::Stalemate => "stalemate",
            TerminationReason::ThreefoldRepetition => "threefold repetition",
            TerminationReason::FiftyMoveRule => "fifty-move rule",
            TerminationReason::InsufficientMaterial => "insufficient material",
            TerminationReason::SeventyFiveMoveRule => "seventy-five-move rule",
            TerminationReason::MoveCap => "move cap",
        };
        f.write_str(text)
    }
}

/// One side of a finished game: identity plus the post-game rating and
/// the quality counters snapshotted before the per-game reset.
#[derive(Clone, Debug, Serialize)]
pub struct PlayerSummary {
    pub name: String,
    pub rating: f64,
    pub stats: GameStats,
}

/// Immutable record of one completed game.
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub white: PlayerSummary,
    pub black: PlayerSummary,
    /// SAN move list in play order
    pub moves: Vec<String>,
    pub outcome: GameOutcome,
    pub termination: TerminationReason,
    pub experiment_id: String,
    pub run_id: String,
    pub started_at: DateTime<Utc>,
}

impl GameRecord {
    /// Winner's name, or `None` for a draw
    pub fn winner(&self) -> Option<&str> {
        match self.outcome {
            GameOutcome::WhiteWins => Some(&self.white.name),
            GameOutcome::BlackWins => Some(&self.black.name),
            GameOutcome::Draw => None,
        }
    }

    pub fn plies(&self) -> usize {
        self.moves.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(outcome: GameOutcome) -> GameRecord {
        GameRecord {
            white: PlayerSummary {
                name: "alpha".into(),
                rating: 1510.0,
                stats: GameStats::default(),
            },
            black: PlayerSummary {
                name: "beta".into(),
                rating: 1490.0,
                stats: GameStats::default(),
            },
            moves: vec!["e4".into(), "e5".into()],
            outcome,
            termination: TerminationReason::MoveCap,
            experiment_id: "exp".into(),
            run_id: "run".into(),
            started_at: Utc::now(),
        }
    }

    #[test]
    fn test_winner() {
        assert_eq!(record(GameOutcome::WhiteWins).winner(), Some("alpha"));
        assert_eq!(record(GameOutcome::BlackWins).winner(), Some("beta"));
        assert_eq!(record(GameOutcome::Draw).winner(), None);
    }

    #[test]
    fn test_perspectives() {
        assert_eq!(GameOutcome::WhiteWins.for_white(), PlayerResult::Win);
        assert_eq!(GameOutcome::WhiteWins.for_black(), PlayerResult::Loss);
        assert_eq!(GameOutcome::Draw.for_white(), PlayerResult::Draw);
    }

    #[test]
    fn test_pgn_tokens() {
        assert_eq!(GameOutcome::WhiteWins.pgn(), "1-0");
        assert_eq!(GameOutcome::BlackWins.pgn(), "0-1");
        assert_eq!(GameOutcome::Draw.pgn(), "1/2-1/2");
    }

    #[test]
    fn test_termination_display() {
        assert_eq!(TerminationReason::MoveCap.to_string(), "move cap");
        assert_eq!(
            TerminationReason::ThreefoldRepetition.to_string(),
            "threefold repetition"
        );
    }
}
