//! UCI output parsing

use llmchess_core::Score;

/// One parsed `info` line carrying a scored principal variation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfoLine {
    /// 1-based MultiPV rank; 1 when the engine omits the field
    pub multipv: usize,
    pub score: Score,
    /// First move of the principal variation, UCI notation
    pub pv_head: String,
}

/// Parse an `info` line into its MultiPV rank, score and PV head move.
/// Lines without a score or a PV (currmove chatter, depth-only updates)
/// yield `None`.
pub fn parse_info_line(line: &str) -> Option<InfoLine> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.first() != Some(&"info") {
        return None;
    }

    let mut multipv = 1usize;
    let mut score = None;
    let mut pv_head = None;

    let mut i = 1;
    while i < tokens.len() {
        match tokens[i] {
            "multipv" => {
                multipv = tokens.get(i + 1)?.parse().ok()?;
                i += 2;
            }
            "score" => match (tokens.get(i + 1), tokens.get(i + 2)) {
                (Some(&"cp"), Some(value)) => {
                    score = Some(Score::Cp(value.parse().ok()?));
                    i += 3;
                }
                (Some(&"mate"), Some(value)) => {
                    score = Some(Score::Mate(value.parse().ok()?));
                    i += 3;
                }
                _ => return None,
            },
            "pv" => {
                pv_head = tokens.get(i + 1).map(|m| m.to_string());
                break;
            }
            _ => i += 1,
        }
    }

    Some(InfoLine {
        multipv,
        score: score?,
        pv_head: pv_head?,
    })
}

/// Extract the move from a `bestmove` line.
pub fn parse_bestmove(line: &str) -> Option<String> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("bestmove") {
        return None;
    }
    tokens.next().map(|m| m.to_string())
}
