//! Elo-style rating updates with a quality-scaled K-factor

use crate::agent::{Agent, RATING_FLOOR};

/// Base K-factor before quality scaling
pub const BASE_K: f64 = 32.0;

/// Game result from one agent's perspective
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerResult {
    Win,
    Loss,
    Draw,
}

impl PlayerResult {
    /// Score value used by the Elo formula
    pub fn score(self) -> f64 {
        match self {
            PlayerResult::Win => 1.0,
            PlayerResult::Loss => 0.0,
            PlayerResult::Draw => 0.5,
        }
    }
}

/// Expected score for a player rated `own` against one rated `opponent`.
pub fn expected_score(own: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - own) / 400.0))
}

/// Update both ratings from one game result.
///
/// The K-factor is not fixed: it scales with the invoking agent's
/// accumulated centipawn loss this game, so an agent that played more
/// inaccurately swings the ratings more. The call site invokes this once
/// per agent per game, each time with that agent's own loss driving K.
/// Both post-update ratings are clamped to [`RATING_FLOOR`].
pub fn update_elo(agent: &mut Agent, opponent: &mut Agent, result: PlayerResult, base_k: f64) {
    let expected = expected_score(agent.rating, opponent.rating);
    let score = result.score();
    let k = base_k * agent.stats.centipawn_loss as f64 / 1000.0;

    agent.rating += k * (score - expected);
    opponent.rating += k * ((1.0 - score) - (1.0 - expected));

    agent.rating = agent.rating.max(RATING_FLOOR);
    opponent.rating = opponent.rating.max(RATING_FLOOR);

    tracing::debug!(
        agent = %agent.name,
        rating = agent.rating,
        opponent = %opponent.name,
        opponent_rating = opponent.rating,
        "ratings updated"
    );
}
