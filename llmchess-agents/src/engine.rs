//! Engine-backed agent: a local UCI engine plays the moves

use llmchess_core::{BackendError, BackendKind, Board, MoveBackend, MoveRequest};
use llmchess_uci::UciEngine;

/// Movetime the engine agent spends per move. Short on purpose; the
/// engine is the baseline opponent, not a demonstration of strength.
pub const ENGINE_MOVETIME_MS: u64 = 100;

pub struct EngineBackend {
    engine: UciEngine,
    movetime_ms: u64,
}

impl EngineBackend {
    pub fn new(engine: UciEngine) -> Self {
        Self {
            engine,
            movetime_ms: ENGINE_MOVETIME_MS,
        }
    }

    /// Spawn the engine at `path`.
    pub fn spawn(path: &str) -> Result<Self, BackendError> {
        let engine = UciEngine::spawn(path)
            .map_err(|e| BackendError::Transport(format!("engine spawn: {}", e)))?;
        Ok(Self::new(engine))
    }

    pub fn with_movetime_ms(mut self, movetime_ms: u64) -> Self {
        self.movetime_ms = movetime_ms;
        self
    }
}

impl MoveBackend for EngineBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::LocalEngine
    }

    fn propose(&mut self, req: &MoveRequest<'_>) -> Result<Option<String>, BackendError> {
        let uci = self
            .engine
            .best_move(req.fen, self.movetime_ms)
            .map_err(|e| BackendError::Transport(format!("engine search: {}", e)))?;

        // The engine answers in UCI; hand back SAN so the acquisition
        // loop sees the same notation the prompts ask for.
        let board = Board::from_fen(req.fen)
            .map_err(|e| BackendError::Transport(format!("bad position: {}", e)))?;
        match board.parse_move(&uci) {
            Ok(m) => {
                let san = board.san(&m);
                tracing::debug!(%uci, %san, "engine move");
                Ok(Some(san))
            }
            Err(e) => Err(BackendError::Transport(format!(
                "engine move '{}' rejected: {}",
                uci, e
            ))),
        }
    }
}
