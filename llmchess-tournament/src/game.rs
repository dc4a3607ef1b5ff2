//! Per-game controller
//!
//! Drives one game ply by ply: acquire a move for the side to move,
//! score it, apply it, then check the claimable and automatic draw
//! conditions in a fixed order. When the game ends both ratings are
//! updated, per-game stats are snapshotted into the record and reset.

use chrono::Utc;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use llmchess_core::{
    update_elo, Agent, AnalysisError, Analyzer, BackendError, Board, GameOutcome, GameRecord,
    MoveBackend, PlayerSummary, TerminationReason,
};

use crate::acquire::acquire_move;
use crate::config::GameConfig;
use crate::scorer::score_move;

/// An agent paired with the backend that produces its moves
pub struct Participant {
    pub agent: Agent,
    pub backend: Box<dyn MoveBackend>,
}

impl Participant {
    pub fn new(agent: Agent, backend: Box<dyn MoveBackend>) -> Self {
        Self { agent, backend }
    }
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Play one game to completion.
///
/// A failed game leaves both agents' ratings untouched; the caller
/// decides whether to skip or abort.
pub fn play_game(
    white: &mut Participant,
    black: &mut Participant,
    analyzer: &mut dyn Analyzer,
    config: &GameConfig,
    rng: &mut ChaCha8Rng,
) -> Result<GameRecord, GameError> {
    let started_at = Utc::now();
    let mut board = Board::new();
    let mut moves: Vec<String> = Vec::new();
    // Feedback slots are color-scoped and persist across plies
    let mut white_feedback = String::new();
    let mut black_feedback = String::new();

    tracing::info!(white = %white.agent.name, black = %black.agent.name, "game started");

    let mut forced_draw: Option<TerminationReason> = None;

    while !board.is_game_over() {
        let white_to_move = board.turn_is_white();
        let (mover, feedback) = if white_to_move {
            (&mut *white, &mut white_feedback)
        } else {
            (&mut *black, &mut black_feedback)
        };

        let history = moves.join(", ");
        let acquired = acquire_move(
            &board,
            mover.backend.as_mut(),
            &history,
            feedback,
            config,
            rng,
        )?;
        score_move(
            &mut mover.agent,
            &board,
            &acquired.mv,
            analyzer,
            config.top_n,
        )?;

        board.push(&acquired.mv);
        moves.push(acquired.san);

        // Claimable draws are taken as soon as available, then the
        // automatic rules, then the ply cap.
        forced_draw = if board.can_claim_threefold() {
            Some(TerminationReason::ThreefoldRepetition)
        } else if board.can_claim_fifty_moves() {
            Some(TerminationReason::FiftyMoveRule)
        } else if board.is_stalemate() {
            Some(TerminationReason::Stalemate)
        } else if board.is_insufficient_material() {
            Some(TerminationReason::InsufficientMaterial)
        } else if board.is_seventyfive_moves() {
            Some(TerminationReason::SeventyFiveMoveRule)
        } else if moves.len() as u32 >= config.max_plies {
            Some(TerminationReason::MoveCap)
        } else {
            None
        };
        if forced_draw.is_some() {
            break;
        }
    }

    let (outcome, termination) = match forced_draw {
        Some(reason) => (GameOutcome::Draw, reason),
        None => match board.result() {
            Some(outcome) => {
                let termination = match outcome {
                    GameOutcome::Draw => TerminationReason::Stalemate,
                    _ => TerminationReason::Checkmate,
                };
                (outcome, termination)
            }
            // Unreachable once is_game_over is true, but a draw is the
            // safe reading.
            None => (GameOutcome::Draw, TerminationReason::Stalemate),
        },
    };

    // The winner's update runs first; a draw defaults to white first.
    match outcome {
        GameOutcome::BlackWins => {
            update_elo(
                &mut black.agent,
                &mut white.agent,
                outcome.for_black(),
                config.base_k,
            );
            update_elo(
                &mut white.agent,
                &mut black.agent,
                outcome.for_white(),
                config.base_k,
            );
        }
        _ => {
            update_elo(
                &mut white.agent,
                &mut black.agent,
                outcome.for_white(),
                config.base_k,
            );
            update_elo(
                &mut black.agent,
                &mut white.agent,
                outcome.for_black(),
                config.base_k,
            );
        }
    }

    let record = GameRecord {
        white: summarize(&white.agent),
        black: summarize(&black.agent),
        moves,
        outcome,
        termination,
        experiment_id: config.experiment_id.clone(),
        run_id: config.run_id.clone(),
        started_at,
    };

    white.agent.reset_game_stats();
    black.agent.reset_game_stats();

    tracing::info!(
        white = %record.white.name,
        black = %record.black.name,
        result = record.outcome.pgn(),
        %termination,
        plies = record.plies(),
        "game finished"
    );

    Ok(record)
}

fn summarize(agent: &Agent) -> PlayerSummary {
    PlayerSummary {
        name: agent.name.clone(),
        rating: agent.rating,
        stats: agent.stats,
    }
}
