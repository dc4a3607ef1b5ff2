//! Board wrapper over the rules engine
//!
//! The harness never implements chess rules itself; this module adapts
//! the rules engine's interface (legal moves, SAN/FEN, terminal
//! predicates) to what the game controller and scorer need, and tracks
//! position hashes so repetition claims can be answered.

use shakmaty::fen::Fen;
use shakmaty::san::{San, SanPlus};
use shakmaty::uci::UciMove;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Outcome, Position};
use thiserror::Error;

use crate::record::GameOutcome;

/// Why a move string was rejected
#[derive(Debug, Error)]
pub enum MoveError {
    #[error("failed to parse move '{text}': {reason}")]
    Unparseable { text: String, reason: String },
    #[error("illegal move: {text}")]
    Illegal { text: String },
}

#[derive(Debug, Error)]
pub enum FenError {
    #[error("invalid FEN '{fen}': {reason}")]
    Invalid { fen: String, reason: String },
}

/// Chess position plus the hash history needed for repetition claims.
#[derive(Clone, Debug)]
pub struct Board {
    pos: Chess,
    /// Zobrist hash of every position seen, the current one last
    seen: Vec<Zobrist64>,
}

impl Board {
    /// Standard initial position
    pub fn new() -> Self {
        let pos = Chess::default();
        let hash = pos.zobrist_hash::<Zobrist64>(EnPassantMode::Legal);
        Self {
            pos,
            seen: vec![hash],
        }
    }

    /// Position from a FEN string. Starts a fresh repetition history.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed: Fen = fen.parse().map_err(|e: shakmaty::fen::ParseFenError| FenError::Invalid {
            fen: fen.to_string(),
            reason: e.to_string(),
        })?;
        let pos: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| FenError::Invalid {
                fen: fen.to_string(),
                reason: e.to_string(),
            })?;
        let hash = pos.zobrist_hash::<Zobrist64>(EnPassantMode::Legal);
        Ok(Self {
            pos,
            seen: vec![hash],
        })
    }

    pub fn fen(&self) -> String {
        Fen::from_position(self.pos.clone(), EnPassantMode::Legal).to_string()
    }

    pub fn turn(&self) -> Color {
        self.pos.turn()
    }

    pub fn turn_is_white(&self) -> bool {
        self.pos.turn() == Color::White
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.pos.legal_moves().into_iter().collect()
    }

    /// Legal moves rendered in SAN, in generation order
    pub fn legal_moves_san(&self) -> Vec<String> {
        self.pos
            .legal_moves()
            .iter()
            .map(|m| SanPlus::from_move(self.pos.clone(), m).to_string())
            .collect()
    }

    /// Parse a move in the current position. SAN is tried first, then
    /// UCI notation; well-formed text naming no legal move is reported
    /// as illegal rather than unparseable.
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveError> {
        let trimmed = text.trim();
        match trimmed.parse::<San>() {
            Ok(san) => san.to_move(&self.pos).map_err(|_| MoveError::Illegal {
                text: trimmed.to_string(),
            }),
            Err(san_err) => match trimmed.parse::<UciMove>() {
                Ok(uci) => uci.to_move(&self.pos).map_err(|_| MoveError::Illegal {
                    text: trimmed.to_string(),
                }),
                Err(_) => Err(MoveError::Unparseable {
                    text: trimmed.to_string(),
                    reason: san_err.to_string(),
                }),
            },
        }
    }

    /// SAN text for a legal move
    pub fn san(&self, m: &Move) -> String {
        SanPlus::from_move(self.pos.clone(), m).to_string()
    }

    /// UCI text for a legal move
    pub fn uci(&self, m: &Move) -> String {
        m.to_uci(CastlingMode::Standard).to_string()
    }

    /// Apply a legal move and record the resulting position hash.
    pub fn push(&mut self, m: &Move) {
        self.pos.play_unchecked(m);
        self.seen
            .push(self.pos.zobrist_hash::<Zobrist64>(EnPassantMode::Legal));
    }

    /// FEN of the position after `m`, leaving the board untouched. The
    /// scratch copy is never observable by other operations.
    pub fn fen_after(&self, m: &Move) -> String {
        let mut scratch = self.pos.clone();
        scratch.play_unchecked(m);
        Fen::from_position(scratch, EnPassantMode::Legal).to_string()
    }

    /// Whether the current position has occurred three or more times
    pub fn can_claim_threefold(&self) -> bool {
        let Some(&current) = self.seen.last() else {
            return false;
        };
        self.seen.iter().filter(|&&h| h == current).count() >= 3
    }

    pub fn can_claim_fifty_moves(&self) -> bool {
        self.pos.halfmoves() >= 100
    }

    pub fn is_seventyfive_moves(&self) -> bool {
        self.pos.halfmoves() >= 150
    }

    pub fn is_stalemate(&self) -> bool {
        self.pos.is_stalemate()
    }

    pub fn is_insufficient_material(&self) -> bool {
        self.pos.is_insufficient_material()
    }

    pub fn is_game_over(&self) -> bool {
        self.pos.is_game_over()
    }

    /// Result reported by the rules engine, if the game is over
    pub fn result(&self) -> Option<GameOutcome> {
        match self.pos.outcome() {
            Some(Outcome::Decisive {
                winner: Color::White,
            }) => Some(GameOutcome::WhiteWins),
            Some(Outcome::Decisive {
                winner: Color::Black,
            }) => Some(GameOutcome::BlackWins),
            Some(Outcome::Draw) => Some(GameOutcome::Draw),
            None => None,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_san(board: &mut Board, san: &str) {
        let m = board.parse_move(san).expect(san);
        board.push(&m);
    }

    #[test]
    fn test_startpos_fen() {
        let board = Board::new();
        assert_eq!(
            board.fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
        assert!(board.turn_is_white());
        assert_eq!(board.legal_moves().len(), 20);
    }

    #[test]
    fn test_parse_san_and_uci() {
        let board = Board::new();
        let san = board.parse_move("e4").expect("SAN");
        let uci = board.parse_move("e2e4").expect("UCI");
        assert_eq!(san, uci);
    }

    #[test]
    fn test_unparseable_vs_illegal() {
        let board = Board::new();
        assert!(matches!(
            board.parse_move("I resign"),
            Err(MoveError::Unparseable { .. })
        ));
        // Well-formed but no knight can reach e5 from the start
        assert!(matches!(
            board.parse_move("Ne5"),
            Err(MoveError::Illegal { .. })
        ));
    }

    #[test]
    fn test_push_and_san_roundtrip() {
        let mut board = Board::new();
        let m = board.parse_move("Nf3").expect("legal");
        assert_eq!(board.san(&m), "Nf3");
        assert_eq!(board.uci(&m), "g1f3");
        board.push(&m);
        assert!(!board.turn_is_white());
    }

    #[test]
    fn test_fen_after_leaves_board_untouched() {
        let board = Board::new();
        let m = board.parse_move("e4").expect("legal");
        let after = board.fen_after(&m);
        assert!(after.contains(" b "));
        assert_eq!(
            board.fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn test_threefold_repetition_claim() {
        let mut board = Board::new();
        // Knight shuffle: the start position recurs after every four plies
        for _ in 0..2 {
            push_san(&mut board, "Nf3");
            push_san(&mut board, "Nf6");
            push_san(&mut board, "Ng1");
            push_san(&mut board, "Ng8");
        }
        assert!(board.can_claim_threefold());
    }

    #[test]
    fn test_no_premature_threefold() {
        let mut board = Board::new();
        push_san(&mut board, "Nf3");
        push_san(&mut board, "Nf6");
        push_san(&mut board, "Ng1");
        push_san(&mut board, "Ng8");
        // Start position has only occurred twice
        assert!(!board.can_claim_threefold());
    }

    #[test]
    fn test_fifty_move_clock_from_fen() {
        let board =
            Board::from_fen("8/8/4k3/8/4K3/8/8/4R3 w - - 100 80").expect("valid FEN");
        assert!(board.can_claim_fifty_moves());
        assert!(!board.is_seventyfive_moves());
    }

    #[test]
    fn test_checkmate_result() {
        let mut board = Board::new();
        for san in ["f3", "e5", "g4", "Qh4#"] {
            push_san(&mut board, san);
        }
        assert!(board.is_game_over());
        assert_eq!(board.result(), Some(GameOutcome::BlackWins));
    }

    #[test]
    fn test_stalemate_detection() {
        let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("valid FEN");
        assert!(board.is_stalemate());
        assert_eq!(board.result(), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_insufficient_material() {
        let board = Board::from_fen("8/8/4k3/8/4K3/8/8/8 w - - 0 1").expect("valid FEN");
        assert!(board.is_insufficient_material());
    }
}
