//! llmchess agents - Move-generation backends
//!
//! Two backend families implement the move-generation capability:
//! - Language-model agents: a prompt is built from the board state and
//!   sent over a chat transport; the move comes back inside `<move>`
//!   tags and is extracted here.
//! - Engine agents: a local UCI engine searches the position directly.

mod engine;
mod llm;
mod prompt;

pub use engine::{EngineBackend, ENGINE_MOVETIME_MS};
pub use llm::{ChatTransport, CommandTransport, LmBackend};
pub use prompt::{build_prompt, extract_move};
