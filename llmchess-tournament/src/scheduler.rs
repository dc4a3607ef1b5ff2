//! Tournament scheduling and aggregation

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use llmchess_core::{Analyzer, GameRecord};

use crate::config::{SchedulePolicy, TournamentConfig};
use crate::game::{play_game, Participant};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("reference agent '{0}' not found in the roster")]
    ReferenceNotFound(String),
}

/// One scheduled game, by roster index
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Matchup {
    pub white: usize,
    pub black: usize,
}

/// Seeded RNG when a seed is given, entropy otherwise.
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Expand the configured policy into a concrete game list.
///
/// `Mixed` pairs everyone with everyone, alternating colors by game
/// parity. `VsReference` pits each agent against the reference for
/// `games_per_pair` games in each color.
pub fn build_matchups(
    participants: &[Participant],
    config: &TournamentConfig,
) -> Result<Vec<Matchup>, ScheduleError> {
    let mut matchups = Vec::new();
    match config.policy {
        SchedulePolicy::Mixed => {
            for i in 0..participants.len() {
                for j in (i + 1)..participants.len() {
                    for game in 0..config.games_per_pair {
                        let (white, black) = if game % 2 == 0 { (i, j) } else { (j, i) };
                        matchups.push(Matchup { white, black });
                    }
                }
            }
        }
        SchedulePolicy::VsReference => {
            let reference = participants
                .iter()
                .position(|p| p.agent.name.eq_ignore_ascii_case(&config.reference_name))
                .ok_or_else(|| ScheduleError::ReferenceNotFound(config.reference_name.clone()))?;
            for i in 0..participants.len() {
                if i == reference {
                    continue;
                }
                for _ in 0..config.games_per_pair {
                    matchups.push(Matchup {
                        white: i,
                        black: reference,
                    });
                    matchups.push(Matchup {
                        white: reference,
                        black: i,
                    });
                }
            }
        }
    }
    Ok(matchups)
}

/// Progress notification for one scheduled game
pub enum GameEvent<'a> {
    Completed(&'a GameRecord),
    Skipped,
}

/// Final table row
#[derive(Clone, Debug)]
pub struct Standing {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub rating: f64,
}

impl Standing {
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

/// Everything a finished tournament produced
pub struct TournamentReport {
    /// Sorted by rating, best first
    pub standings: Vec<Standing>,
    pub games: Vec<GameRecord>,
    /// Games abandoned because a backend or the analyzer failed
    pub skipped: u32,
}

pub fn run_tournament(
    participants: &mut [Participant],
    analyzer: &mut dyn Analyzer,
    config: &TournamentConfig,
) -> Result<TournamentReport, ScheduleError> {
    run_tournament_with(participants, analyzer, config, |_| {})
}

/// Run the full schedule, invoking `on_game` after each scheduled game.
///
/// A failed game is logged and skipped; ratings and tallies only move
/// for games that complete.
pub fn run_tournament_with(
    participants: &mut [Participant],
    analyzer: &mut dyn Analyzer,
    config: &TournamentConfig,
    mut on_game: impl FnMut(GameEvent<'_>),
) -> Result<TournamentReport, ScheduleError> {
    let mut rng = create_rng(config.seed);
    let mut matchups = build_matchups(participants, config)?;
    matchups.shuffle(&mut rng);

    tracing::info!(
        agents = participants.len(),
        games = matchups.len(),
        policy = ?config.policy,
        "tournament started"
    );

    // (wins, losses, draws) per roster index
    let mut tallies = vec![(0u32, 0u32, 0u32); participants.len()];
    let mut games = Vec::with_capacity(matchups.len());
    let mut skipped = 0u32;

    for matchup in &matchups {
        let (white, black) = pair_mut(participants, matchup.white, matchup.black);
        match play_game(white, black, analyzer, &config.game, &mut rng) {
            Ok(record) => {
                match record.winner() {
                    Some(name) if name == record.white.name => {
                        tallies[matchup.white].0 += 1;
                        tallies[matchup.black].1 += 1;
                    }
                    Some(_) => {
                        tallies[matchup.black].0 += 1;
                        tallies[matchup.white].1 += 1;
                    }
                    None => {
                        tallies[matchup.white].2 += 1;
                        tallies[matchup.black].2 += 1;
                    }
                }
                on_game(GameEvent::Completed(&record));
                games.push(record);
            }
            Err(err) => {
                tracing::warn!(
                    white = %participants[matchup.white].agent.name,
                    black = %participants[matchup.black].agent.name,
                    error = %err,
                    "game failed, skipping"
                );
                skipped += 1;
                on_game(GameEvent::Skipped);
            }
        }
    }

    let mut standings: Vec<Standing> = participants
        .iter()
        .zip(&tallies)
        .map(|(p, &(wins, losses, draws))| Standing {
            name: p.agent.name.clone(),
            wins,
            losses,
            draws,
            rating: p.agent.rating,
        })
        .collect();
    standings.sort_by(|a, b| b.rating.total_cmp(&a.rating));

    tracing::info!(completed = games.len(), skipped, "tournament finished");

    Ok(TournamentReport {
        standings,
        games,
        skipped,
    })
}

/// Disjoint mutable borrows of two roster slots.
fn pair_mut(participants: &mut [Participant], a: usize, b: usize) -> (&mut Participant, &mut Participant) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = participants.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = participants.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
