//! Configuration types for games and tournaments

use std::time::Duration;

use llmchess_core::BASE_K;

/// How matchups are generated
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulePolicy {
    /// Every unordered pair of agents plays the configured number of
    /// games, alternating colors by game-index parity
    Mixed,
    /// Every agent plays the reference agent, half as white and half as
    /// black; the reference is found by case-insensitive name
    VsReference,
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        SchedulePolicy::Mixed
    }
}

/// Per-game knobs
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Wall-clock budget per ply, measured from the start of move
    /// acquisition; after this a random legal move is substituted
    pub move_deadline: Duration,
    /// Pause after an illegal attempt so a remote backend is not hit in
    /// a tight error loop
    pub retry_backoff: Duration,
    /// Hard cap on plies; reaching it draws the game
    pub max_plies: u32,
    /// Width of the candidate list used for top-N matching
    pub top_n: usize,
    /// Base Elo K-factor before quality scaling
    pub base_k: f64,
    pub experiment_id: String,
    pub run_id: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            move_deadline: Duration::from_secs(120),
            retry_backoff: Duration::from_secs(1),
            max_plies: 100,
            top_n: 3,
            base_k: BASE_K,
            experiment_id: String::new(),
            run_id: String::new(),
        }
    }
}

impl GameConfig {
    pub fn with_move_deadline(mut self, deadline: Duration) -> Self {
        self.move_deadline = deadline;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    pub fn with_max_plies(mut self, max_plies: u32) -> Self {
        self.max_plies = max_plies;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_run_ids(
        mut self,
        experiment_id: impl Into<String>,
        run_id: impl Into<String>,
    ) -> Self {
        self.experiment_id = experiment_id.into();
        self.run_id = run_id.into();
        self
    }
}

/// Tournament configuration
#[derive(Clone, Debug)]
pub struct TournamentConfig {
    pub policy: SchedulePolicy,
    /// Games per pairing (per pair in `Mixed`; per color per opponent
    /// in `VsReference`)
    pub games_per_pair: usize,
    /// Name of the reference agent, matched case-insensitively
    pub reference_name: String,
    pub game: GameConfig,
    /// Seed for the matchup shuffle and fallback moves (None = random)
    pub seed: Option<u64>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            policy: SchedulePolicy::Mixed,
            games_per_pair: 3,
            reference_name: "stockfish".to_string(),
            game: GameConfig::default(),
            seed: None,
        }
    }
}

impl TournamentConfig {
    pub fn mixed(games_per_pair: usize) -> Self {
        Self {
            policy: SchedulePolicy::Mixed,
            games_per_pair,
            ..Default::default()
        }
    }

    pub fn vs_reference(games_per_pair: usize) -> Self {
        Self {
            policy: SchedulePolicy::VsReference,
            games_per_pair,
            ..Default::default()
        }
    }

    pub fn with_reference_name(mut self, name: impl Into<String>) -> Self {
        self.reference_name = name.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_config_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.move_deadline, Duration::from_secs(120));
        assert_eq!(config.retry_backoff, Duration::from_secs(1));
        assert_eq!(config.max_plies, 100);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.base_k, BASE_K);
    }

    #[test]
    fn test_tournament_config_builders() {
        let config = TournamentConfig::vs_reference(5)
            .with_reference_name("Stockfish")
            .with_seed(42);
        assert_eq!(config.policy, SchedulePolicy::VsReference);
        assert_eq!(config.games_per_pair, 5);
        assert_eq!(config.reference_name, "Stockfish");
        assert_eq!(config.seed, Some(42));
    }
}
