//! llmchess tournament - Game execution and scheduling
//!
//! This crate drives the benchmark:
//! - Move acquisition with deadline, retry feedback and random fallback
//! - Move scoring against the reference analyzer
//! - The per-game controller (terminal detection, rating updates)
//! - The tournament scheduler (matchup policies, aggregation)

mod acquire;
mod config;
mod game;
mod scheduler;
mod scorer;

pub use acquire::{acquire_move, AcquiredMove};
pub use config::{GameConfig, SchedulePolicy, TournamentConfig};
pub use game::{play_game, GameError, Participant};
pub use scheduler::{
    build_matchups, create_rng, run_tournament, run_tournament_with, GameEvent, Matchup,
    ScheduleError, Standing, TournamentReport,
};
pub use scorer::{classify, score_move, MoveClass, BLUNDER_THRESHOLD, INACCURACY_THRESHOLD};
