//! Move acquisition: deadline, retry feedback, random fallback
//!
//! The acquisition loop never fails to produce a move. Each iteration
//! either returns a legal move parsed from the backend's response or
//! retries with updated feedback; once the deadline has passed a
//! uniformly random legal move is substituted without consulting the
//! backend. Only a transport failure escapes.

use std::thread;
use std::time::Instant;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use llmchess_core::{BackendError, Board, Move, MoveBackend, MoveError, MoveRequest};

use crate::config::GameConfig;

/// A legal move produced by the acquisition loop
#[derive(Clone, Debug)]
pub struct AcquiredMove {
    pub mv: Move,
    pub san: String,
    /// True when the deadline forced a random substitute
    pub fallback: bool,
}

/// Obtain one legal move for the side to move.
///
/// `feedback` is that agent's color-scoped feedback slot; it persists
/// across plies until an attempt here overwrites it, so the backend
/// always sees the outcome of its previous try.
pub fn acquire_move(
    board: &Board,
    backend: &mut dyn MoveBackend,
    history: &str,
    feedback: &mut String,
    config: &GameConfig,
    rng: &mut ChaCha8Rng,
) -> Result<AcquiredMove, BackendError> {
    let fen = board.fen();
    let legal_text = board.legal_moves_san().join(", ");
    let started = Instant::now();

    loop {
        if started.elapsed() >= config.move_deadline {
            return Ok(random_fallback(board, rng));
        }

        let request = MoveRequest {
            fen: &fen,
            legal_moves: &legal_text,
            history,
            feedback,
        };
        let Some(text) = backend.propose(&request)? else {
            *feedback =
                "No move found in the response; reply with the move inside <move> tags".to_string();
            tracing::debug!("response carried no move, retrying");
            continue;
        };

        match board.parse_move(&text) {
            Ok(mv) => {
                let san = board.san(&mv);
                return Ok(AcquiredMove {
                    mv,
                    san,
                    fallback: false,
                });
            }
            Err(MoveError::Illegal { .. }) => {
                *feedback = format!("Illegal move: {}. Legal moves are: {}", text, legal_text);
                tracing::debug!(attempt = %text, "illegal move, retrying");
                thread::sleep(config.retry_backoff);
            }
            Err(err @ MoveError::Unparseable { .. }) => {
                *feedback = err.to_string();
                tracing::debug!(attempt = %text, "unparseable move, retrying");
            }
        }
    }
}

/// Uniformly random legal move, bypassing the backend entirely.
fn random_fallback(board: &Board, rng: &mut ChaCha8Rng) -> AcquiredMove {
    let legal = board.legal_moves();
    let mv = legal[rng.gen_range(0..legal.len())].clone();
    let san = board.san(&mv);
    tracing::debug!(%san, "deadline exceeded, substituting random legal move");
    AcquiredMove {
        mv,
        san,
        fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llmchess_core::BackendKind;
    use rand::SeedableRng;
    use std::time::Duration;

    /// Backend that replays a fixed script of responses
    struct ScriptedBackend {
        responses: Vec<Option<String>>,
        next: usize,
    }

    impl ScriptedBackend {
        fn new(responses: Vec<Option<&str>>) -> Self {
            Self {
                responses: responses
                    .into_iter()
                    .map(|r| r.map(str::to_string))
                    .collect(),
                next: 0,
            }
        }
    }

    impl MoveBackend for ScriptedBackend {
        fn kind(&self) -> BackendKind {
            BackendKind::RemoteLm
        }

        fn propose(&mut self, _req: &MoveRequest<'_>) -> Result<Option<String>, BackendError> {
            let response = self.responses.get(self.next).cloned().unwrap_or(None);
            self.next += 1;
            Ok(response)
        }
    }

    struct FailingBackend;

    impl MoveBackend for FailingBackend {
        fn kind(&self) -> BackendKind {
            BackendKind::RemoteLm
        }

        fn propose(&mut self, _req: &MoveRequest<'_>) -> Result<Option<String>, BackendError> {
            Err(BackendError::Transport("connection reset".into()))
        }
    }

    fn test_config() -> GameConfig {
        GameConfig::default()
            .with_move_deadline(Duration::from_secs(30))
            .with_retry_backoff(Duration::ZERO)
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_legal_move_returned_immediately() {
        let board = Board::new();
        let mut backend = ScriptedBackend::new(vec![Some("e4")]);
        let mut feedback = String::new();

        let acquired =
            acquire_move(&board, &mut backend, "", &mut feedback, &test_config(), &mut rng())
                .expect("no transport error");

        assert_eq!(acquired.san, "e4");
        assert!(!acquired.fallback);
        // No failure this ply, so the previous feedback survives
        assert!(feedback.is_empty());
    }

    #[test]
    fn test_illegal_then_legal_sets_feedback() {
        let board = Board::new();
        let mut backend = ScriptedBackend::new(vec![Some("Ke2"), Some("d4")]);
        let mut feedback = String::new();

        let acquired =
            acquire_move(&board, &mut backend, "", &mut feedback, &test_config(), &mut rng())
                .expect("no transport error");

        assert_eq!(acquired.san, "d4");
        assert!(feedback.starts_with("Illegal move: Ke2"));
        assert!(feedback.contains("Legal moves are:"));
    }

    #[test]
    fn test_unparseable_then_legal_sets_feedback() {
        let board = Board::new();
        let mut backend = ScriptedBackend::new(vec![Some("castle long"), Some("Nf3")]);
        let mut feedback = String::new();

        let acquired =
            acquire_move(&board, &mut backend, "", &mut feedback, &test_config(), &mut rng())
                .expect("no transport error");

        assert_eq!(acquired.san, "Nf3");
        assert!(feedback.contains("failed to parse move 'castle long'"));
    }

    #[test]
    fn test_missing_move_then_legal() {
        let board = Board::new();
        let mut backend = ScriptedBackend::new(vec![None, Some("c4")]);
        let mut feedback = String::new();

        let acquired =
            acquire_move(&board, &mut backend, "", &mut feedback, &test_config(), &mut rng())
                .expect("no transport error");

        assert_eq!(acquired.san, "c4");
        assert!(feedback.contains("<move>"));
    }

    #[test]
    fn test_deadline_fallback_is_legal() {
        let board = Board::new();
        // Backend would answer, but the deadline has already passed
        let mut backend = ScriptedBackend::new(vec![Some("e4")]);
        let mut feedback = String::new();
        let config = test_config().with_move_deadline(Duration::ZERO);

        let acquired = acquire_move(&board, &mut backend, "", &mut feedback, &config, &mut rng())
            .expect("no transport error");

        assert!(acquired.fallback);
        let legal = board.legal_moves_san();
        assert!(legal.contains(&acquired.san));
        // The backend was never consulted
        assert_eq!(backend.next, 0);
    }

    #[test]
    fn test_fallback_uniform_over_legal_set() {
        let board = Board::new();
        let config = test_config().with_move_deadline(Duration::ZERO);
        let legal = board.legal_moves_san();
        let mut rng = rng();

        for _ in 0..50 {
            let mut backend = ScriptedBackend::new(vec![]);
            let mut feedback = String::new();
            let acquired =
                acquire_move(&board, &mut backend, "", &mut feedback, &config, &mut rng)
                    .expect("no transport error");
            assert!(legal.contains(&acquired.san));
        }
    }

    #[test]
    fn test_transport_error_propagates() {
        let board = Board::new();
        let mut feedback = String::new();

        let result = acquire_move(
            &board,
            &mut FailingBackend,
            "",
            &mut feedback,
            &test_config(),
            &mut rng(),
        );

        assert!(matches!(result, Err(BackendError::Transport(_))));
    }
}
