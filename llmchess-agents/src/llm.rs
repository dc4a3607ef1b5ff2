//! Language-model backends over a chat transport

use std::io::Write;
use std::process::{Command, Stdio};

use llmchess_core::{BackendError, BackendKind, MoveBackend, MoveRequest};

use crate::prompt::{build_prompt, extract_move};

/// Completes a prompt against some model provider. Provider plumbing
/// (HTTP clients, auth, rate limits) lives behind this seam.
pub trait ChatTransport {
    fn complete(&mut self, prompt: &str) -> Result<String, BackendError>;
}

/// Language-model agent backend: build the prompt, run the transport,
/// extract the `<move>` tag.
pub struct LmBackend<T: ChatTransport> {
    transport: T,
}

impl<T: ChatTransport> LmBackend<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

impl<T: ChatTransport> MoveBackend for LmBackend<T> {
    fn kind(&self) -> BackendKind {
        BackendKind::RemoteLm
    }

    fn propose(&mut self, req: &MoveRequest<'_>) -> Result<Option<String>, BackendError> {
        let prompt = build_prompt(req);
        let response = self.transport.complete(&prompt)?;
        let proposed = extract_move(&response);
        tracing::debug!(
            response_len = response.len(),
            proposed = proposed.as_deref().unwrap_or("<none>"),
            "model response"
        );
        Ok(proposed)
    }
}

/// Transport that pipes the prompt through an external command's stdin
/// and reads the completion from its stdout. Lets any provider script
/// act as a model without this crate knowing about HTTP or API keys.
pub struct CommandTransport {
    program: String,
    args: Vec<String>,
}

impl CommandTransport {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a single command line, split on whitespace.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl ChatTransport for CommandTransport {
    fn complete(&mut self, prompt: &str) -> Result<String, BackendError> {
        tracing::trace!(program = %self.program, "running transport command");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(stdin) = child.stdin.as_mut() {
            stdin.write_all(prompt.as_bytes())?;
        }
        // Close stdin so the command sees EOF
        drop(child.stdin.take());

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(BackendError::Transport(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| BackendError::Transport(format!("non-utf8 output: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedTransport(String);

    impl ChatTransport for CannedTransport {
        fn complete(&mut self, _prompt: &str) -> Result<String, BackendError> {
            Ok(self.0.clone())
        }
    }

    fn request<'a>() -> MoveRequest<'a> {
        MoveRequest {
            fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            legal_moves: "e4, d4",
            history: "",
            feedback: "",
        }
    }

    #[test]
    fn test_lm_backend_extracts_move() {
        let mut backend = LmBackend::new(CannedTransport("play <move>e4</move>!".into()));
        assert_eq!(backend.kind(), BackendKind::RemoteLm);
        let proposed = backend.propose(&request()).expect("transport ok");
        assert_eq!(proposed, Some("e4".to_string()));
    }

    #[test]
    fn test_lm_backend_missing_tags_is_none() {
        let mut backend = LmBackend::new(CannedTransport("no tags here".into()));
        let proposed = backend.propose(&request()).expect("transport ok");
        assert_eq!(proposed, None);
    }

    #[test]
    fn test_command_transport_round_trip() {
        // `cat` echoes the prompt back, so the extracted move should be
        // whatever we smuggle into the feedback field.
        let mut backend = LmBackend::new(CommandTransport::new("cat", vec![]));
        let req = MoveRequest {
            feedback: "<move>d4</move>",
            ..request()
        };
        let proposed = backend.propose(&req).expect("cat available");
        assert_eq!(proposed, Some("d4".to_string()));
    }

    #[test]
    fn test_command_transport_failure_is_transport_error() {
        let mut transport = CommandTransport::new("false", vec![]);
        assert!(matches!(
            transport.complete("hello"),
            Err(BackendError::Transport(_))
        ));
    }

    #[test]
    fn test_from_command_line() {
        let t = CommandTransport::from_command_line("python3 ask_model.py --model gpt-4o")
            .expect("non-empty");
        assert_eq!(t.program, "python3");
        assert_eq!(t.args, vec!["ask_model.py", "--model", "gpt-4o"]);
        assert!(CommandTransport::from_command_line("   ").is_none());
    }
}
