//! llmchess core - Shared data model and collaborator interfaces
//!
//! This crate provides the pieces the rest of the workspace is built on:
//! - Agent identity, rating and per-game quality counters
//! - The Elo-style rating updater with quality-scaled K-factor
//! - A board wrapper over the rules engine (legality, SAN/FEN, draws)
//! - Game records handed to persistence
//! - Interfaces for the reference analyzer and move-generation backends

pub mod agent;
pub mod analysis;
pub mod backend;
pub mod board;
pub mod rating;
pub mod record;

// Re-exports for convenient access
pub use agent::{Agent, BackendKind, GameStats, BASELINE_RATING, RATING_FLOOR};
pub use analysis::{AnalysisError, Analyzer, Score, ScoredMove};
pub use backend::{BackendError, MoveBackend, MoveRequest};
pub use board::{Board, FenError, MoveError};
pub use rating::{expected_score, update_elo, PlayerResult, BASE_K};
pub use record::{GameOutcome, GameRecord, PlayerSummary, TerminationReason};

pub use shakmaty::{Color, Move};
