//! Roster file: which agents play and how to reach them

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use llmchess_agents::{CommandTransport, EngineBackend, LmBackend};
use llmchess_core::{Agent, BackendKind};
use llmchess_tournament::Participant;

/// How a roster entry produces moves
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// Local UCI engine; `backend` is the executable path
    Uci,
    /// External command fed the prompt on stdin; `backend` is the
    /// command line
    Command,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub provider: Provider,
    /// Engine path or command line, depending on the provider
    pub backend: String,
    /// Starting rating override
    #[serde(default)]
    pub rating: Option<f64>,
}

/// Parse a roster from JSON text.
pub fn parse_roster(text: &str) -> Result<Vec<RosterEntry>> {
    let entries: Vec<RosterEntry> =
        serde_json::from_str(text).context("roster is not valid JSON")?;
    if entries.is_empty() {
        bail!("roster is empty");
    }
    Ok(entries)
}

/// Load a roster file and spawn a participant for every entry.
pub fn load_participants(path: &str) -> Result<Vec<Participant>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster '{}'", path))?;
    let entries = parse_roster(&text)?;
    entries.into_iter().map(build_participant).collect()
}

fn build_participant(entry: RosterEntry) -> Result<Participant> {
    let (kind, backend): (BackendKind, Box<dyn llmchess_core::MoveBackend>) = match entry.provider
    {
        Provider::Uci => {
            let backend = EngineBackend::spawn(&entry.backend)
                .with_context(|| format!("failed to start engine for '{}'", entry.name))?;
            (BackendKind::LocalEngine, Box::new(backend))
        }
        Provider::Command => {
            let transport = CommandTransport::from_command_line(&entry.backend)
                .with_context(|| format!("empty command line for '{}'", entry.name))?;
            (BackendKind::RemoteLm, Box::new(LmBackend::new(transport)))
        }
    };

    let mut agent = Agent::new(&entry.name, kind, &entry.backend);
    if let Some(rating) = entry.rating {
        agent = agent.with_rating(rating);
    }
    tracing::debug!(name = %agent.name, kind = ?agent.kind, "roster entry loaded");
    Ok(Participant::new(agent, backend))
}
