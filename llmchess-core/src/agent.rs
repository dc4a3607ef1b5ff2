//! Agent identity, rating and per-game move-quality counters

use serde::{Deserialize, Serialize};

/// Rating every agent starts from
pub const BASELINE_RATING: f64 = 1500.0;

/// Ratings are clamped so they never fall below this
pub const RATING_FLOOR: f64 = 100.0;

/// How an agent produces moves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Remote language model queried over a chat transport
    RemoteLm,
    /// Local engine searching the position directly
    LocalEngine,
}

/// Move-quality counters accumulated over a single game.
///
/// All counters are monotonically non-decreasing within a game and are
/// zeroed at every game boundary; the harness measures per-game quality,
/// not cumulative drift.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    /// Total centipawn loss across scored moves
    pub centipawn_loss: i64,
    /// Moves losing at least a pawn of evaluation
    pub blunders: u32,
    /// Moves losing a fifth of a pawn or more
    pub inaccuracies: u32,
    /// Moves that matched one of the analyzer's top candidates
    pub top_n_matches: u32,
    /// Number of moves that went through scoring
    pub moves_scored: u32,
}

/// A participant in the benchmark: identity plus mutable rating and
/// per-game counters. Owned exclusively by the tournament process.
#[derive(Clone, Debug)]
pub struct Agent {
    pub name: String,
    pub kind: BackendKind,
    /// Backend identifier: model id for remote agents, engine path for
    /// local ones
    pub backend_id: String,
    pub rating: f64,
    pub stats: GameStats,
}

impl Agent {
    pub fn new(name: impl Into<String>, kind: BackendKind, backend_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            backend_id: backend_id.into(),
            rating: BASELINE_RATING,
            stats: GameStats::default(),
        }
    }

    /// Override the starting rating
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Reference-engine agents are the measurement baseline and are not
    /// scored against themselves.
    pub fn is_reference(&self) -> bool {
        self.kind == BackendKind::LocalEngine
    }

    /// Zero the per-game counters. Called exactly once per game boundary;
    /// the rating deliberately survives so it can drift across the
    /// tournament.
    pub fn reset_game_stats(&mut self) {
        self.stats = GameStats::default();
    }
}
