//! Prompt construction and move extraction for language-model agents

use llmchess_core::MoveRequest;

const MOVE_OPEN: &str = "<move>";
const MOVE_CLOSE: &str = "</move>";

/// Render the fixed prompt template for a move request.
pub fn build_prompt(req: &MoveRequest<'_>) -> String {
    format!(
        "You are a chess grandmaster. Given the current state of the chess board:\n\
         {}\n\
         Legal moves: {}\n\
         History of moves so far: {}\n\
         Feedback on the previous move: {}\n\
         Generate the next move and explain your reasoning concisely.\n\
         The move should be in a <move> tag",
        req.fen, req.legal_moves, req.history, req.feedback
    )
}

/// Pull the move out of a model response: the sole content between one
/// pair of `<move>` tags. Missing markers mean no move was found, which
/// is not an error.
pub fn extract_move(response: &str) -> Option<String> {
    let start = response.find(MOVE_OPEN)? + MOVE_OPEN.len();
    let rest = &response[start..];
    let end = rest.find(MOVE_CLOSE)?;
    let candidate = rest[..end].trim();
    if candidate.is_empty() {
        None
    } else {
        Some(candidate.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_all_request_fields() {
        let req = MoveRequest {
            fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            legal_moves: "e4, d4, Nf3",
            history: "",
            feedback: "Illegal move: Ke2",
        };
        let prompt = build_prompt(&req);
        assert!(prompt.contains(req.fen));
        assert!(prompt.contains("Legal moves: e4, d4, Nf3"));
        assert!(prompt.contains("Feedback on the previous move: Illegal move: Ke2"));
        assert!(prompt.contains("<move>"));
    }

    #[test]
    fn test_extract_simple() {
        assert_eq!(
            extract_move("I will play <move>e4</move> because it controls the center."),
            Some("e4".to_string())
        );
    }

    #[test]
    fn test_extract_with_whitespace() {
        assert_eq!(
            extract_move("<move>\n  Nf3 \n</move>"),
            Some("Nf3".to_string())
        );
    }

    #[test]
    fn test_extract_first_pair_wins() {
        assert_eq!(
            extract_move("<move>d4</move> or maybe <move>c4</move>"),
            Some("d4".to_string())
        );
    }

    #[test]
    fn test_missing_markers() {
        assert_eq!(extract_move("The best move is e4."), None);
        assert_eq!(extract_move("<move>e4"), None);
        assert_eq!(extract_move("e4</move>"), None);
    }

    #[test]
    fn test_empty_tags() {
        assert_eq!(extract_move("<move></move>"), None);
        assert_eq!(extract_move("<move>   </move>"), None);
    }
}
