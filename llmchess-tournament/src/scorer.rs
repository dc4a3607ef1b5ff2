//! Move-quality scoring against the reference analyzer
//!
//! Each scored move costs two analyzer calls: a shallow MultiPV probe
//! of the pre-move position and a deeper single-line evaluation of the
//! post-move position. Centipawn loss is the gap between the best
//! pre-move score and the score the played move implies, both from the
//! mover's perspective.

use llmchess_core::{Agent, AnalysisError, Analyzer, Board, Move, Score};

/// Loss at or above this is a blunder
pub const BLUNDER_THRESHOLD: i32 = 100;
/// Loss at or above this (and below the blunder line) is an inaccuracy
pub const INACCURACY_THRESHOLD: i32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveClass {
    Normal,
    Inaccuracy,
    Blunder,
}

/// Bucket a centipawn loss.
pub fn classify(loss: i32) -> MoveClass {
    if loss >= BLUNDER_THRESHOLD {
        MoveClass::Blunder
    } else if loss >= INACCURACY_THRESHOLD {
        MoveClass::Inaccuracy
    } else {
        MoveClass::Normal
    }
}

/// Score one played move and fold the result into the agent's
/// per-game stats. Returns the centipawn loss.
///
/// Reference agents are exempt: their moves define the baseline, so
/// scoring them would only double the analyzer bill.
pub fn score_move(
    agent: &mut Agent,
    board: &Board,
    mv: &Move,
    analyzer: &mut dyn Analyzer,
    top_n: usize,
) -> Result<i32, AnalysisError> {
    if agent.is_reference() {
        return Ok(0);
    }

    let fen = board.fen();
    let candidates = analyzer.top_moves(&fen, top_n)?;
    let reply = analyzer.score(&board.fen_after(mv))?;

    // The reply score is from the opponent's perspective; negate to get
    // what the played move implies for the mover.
    let implied = -reply;
    let best = candidates.first().map(|c| c.score);

    // Mate scores and missing lines contribute no loss; the Elo update
    // already rewards the win itself.
    let loss = match (best.and_then(|s| s.centipawns()), implied.centipawns()) {
        (Some(best_cp), Some(implied_cp)) => (best_cp - implied_cp).abs(),
        _ => 0,
    };

    agent.stats.centipawn_loss += i64::from(loss);
    agent.stats.moves_scored += 1;
    match classify(loss) {
        MoveClass::Blunder => agent.stats.blunders += 1,
        MoveClass::Inaccuracy => agent.stats.inaccuracies += 1,
        MoveClass::Normal => {}
    }

    let uci = board.uci(mv);
    if candidates.iter().any(|c| c.uci == uci) {
        agent.stats.top_n_matches += 1;
    }

    tracing::debug!(agent = %agent.name, %uci, loss, "scored move");
    Ok(loss)
}
