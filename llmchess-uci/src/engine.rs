//! UCI engine subprocess client

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use llmchess_core::{AnalysisError, Analyzer, Score, ScoredMove};

use crate::protocol::{parse_bestmove, parse_info_line};

/// Movetime for the MultiPV candidate search at the pre-move position.
/// Deliberately shallower than the post-move score; the asymmetry is
/// kept for comparability with earlier benchmark runs.
pub const MULTIPV_MOVETIME_MS: u64 = 100;

/// Movetime for the single-line score of the post-move position
pub const SCORE_MOVETIME_MS: u64 = 1000;

/// Handle to a running UCI engine.
pub struct UciEngine {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    multipv: usize,
}

impl UciEngine {
    /// Spawn the engine binary and complete the UCI handshake.
    pub fn spawn(path: &str) -> Result<Self, AnalysisError> {
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| AnalysisError::Protocol("engine stdin unavailable".into()))?;
        let stdout = child
            .stdout
            .take()
            .map(BufReader::new)
            .ok_or_else(|| AnalysisError::Protocol("engine stdout unavailable".into()))?;

        let mut engine = Self {
            child,
            stdin,
            stdout,
            multipv: 1,
        };

        engine.send("uci")?;
        engine.wait_for("uciok")?;
        engine.send("isready")?;
        engine.wait_for("readyok")?;

        tracing::debug!(%path, "engine ready");
        Ok(engine)
    }

    fn send(&mut self, command: &str) -> Result<(), AnalysisError> {
        writeln!(self.stdin, "{}", command)?;
        self.stdin.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, AnalysisError> {
        let mut line = String::new();
        let n = self.stdout.read_line(&mut line)?;
        if n == 0 {
            return Err(AnalysisError::Protocol("engine closed its pipe".into()));
        }
        Ok(line)
    }

    fn wait_for(&mut self, token: &str) -> Result<(), AnalysisError> {
        loop {
            let line = self.read_line()?;
            if line.trim_start().starts_with(token) {
                return Ok(());
            }
        }
    }

    fn set_multipv(&mut self, n: usize) -> Result<(), AnalysisError> {
        if n != self.multipv {
            self.send(&format!("setoption name MultiPV value {}", n))?;
            self.multipv = n;
        }
        Ok(())
    }

    /// Search `fen` for `movetime_ms`, returning up to `n` candidate
    /// lines ranked strongest first. Scores are relative to the side to
    /// move, as the protocol defines them.
    pub fn analyze(
        &mut self,
        fen: &str,
        movetime_ms: u64,
        n: usize,
    ) -> Result<Vec<ScoredMove>, AnalysisError> {
        self.set_multipv(n)?;
        self.send(&format!("position fen {}", fen))?;
        self.send(&format!("go movetime {}", movetime_ms))?;

        // Keep only the deepest report per MultiPV rank
        let mut lines: Vec<Option<ScoredMove>> = vec![None; n];
        loop {
            let line = self.read_line()?;
            if let Some(info) = parse_info_line(&line) {
                if info.multipv >= 1 && info.multipv <= n {
                    lines[info.multipv - 1] = Some(ScoredMove {
                        uci: info.pv_head,
                        score: info.score,
                    });
                }
            } else if parse_bestmove(&line).is_some() {
                break;
            }
        }

        Ok(lines.into_iter().flatten().collect())
    }

    /// Search `fen` for `movetime_ms` and return the engine's move.
    pub fn best_move(&mut self, fen: &str, movetime_ms: u64) -> Result<String, AnalysisError> {
        self.set_multipv(1)?;
        self.send(&format!("position fen {}", fen))?;
        self.send(&format!("go movetime {}", movetime_ms))?;

        loop {
            let line = self.read_line()?;
            if let Some(best) = parse_bestmove(&line) {
                return Ok(best);
            }
        }
    }
}

impl Analyzer for UciEngine {
    fn top_moves(&mut self, fen: &str, n: usize) -> Result<Vec<ScoredMove>, AnalysisError> {
        self.analyze(fen, MULTIPV_MOVETIME_MS, n)
    }

    fn score(&mut self, fen: &str) -> Result<Score, AnalysisError> {
        let lines = self.analyze(fen, SCORE_MOVETIME_MS, 1)?;
        lines
            .first()
            .map(|l| l.score)
            .ok_or_else(|| AnalysisError::Protocol("no scored line in engine output".into()))
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        let _ = self.send("quit");
        let _ = self.child.wait();
    }
}
