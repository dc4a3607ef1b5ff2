//! Result persistence: per-game CSV rows, the final table and PGN logs

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use llmchess_core::GameRecord;
use llmchess_tournament::Standing;

const GAME_CSV_HEADER: &str =
    "player,opponent,result,cumulative_centipawn_loss,blunders,inaccuracies,matches_top_n,moves_scored,elo_rating";

/// Quote a field when it would break the row (commas, quotes, newlines),
/// doubling embedded quotes per the usual CSV convention.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Append one row per player for a finished game, writing the header if
/// the file is new.
pub fn append_game_rows(path: &Path, record: &GameRecord) -> Result<()> {
    let new_file = !path.exists();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    if new_file {
        writeln!(file, "{}", GAME_CSV_HEADER)?;
    }
    let white = &record.white;
    let black = &record.black;
    for (player, opponent, result) in [
        (white, black, record.outcome.for_white()),
        (black, white, record.outcome.for_black()),
    ] {
        writeln!(
            file,
            "{},{},{:?},{},{},{},{},{},{:.1}",
            csv_field(&player.name),
            csv_field(&opponent.name),
            result,
            player.stats.centipawn_loss,
            player.stats.blunders,
            player.stats.inaccuracies,
            player.stats.top_n_matches,
            player.stats.moves_scored,
            player.rating,
        )?;
    }
    Ok(())
}

/// Write the final table, overwriting any previous run's file.
pub fn write_results_csv(path: &Path, standings: &[Standing]) -> Result<()> {
    let mut out = String::from("Model Name,Wins,Losses,Draws,Rating\n");
    for s in standings {
        out.push_str(&format!(
            "{},{},{},{},{:.1}\n",
            csv_field(&s.name),
            s.wins,
            s.losses,
            s.draws,
            s.rating
        ));
    }
    std::fs::write(path, out).with_context(|| format!("failed to write {}", path.display()))
}

/// Render a game as a single PGN entry.
pub fn to_pgn(record: &GameRecord) -> String {
    let mut pgn = String::new();
    pgn.push_str("[Event \"LLM Tournament Match\"]\n");
    pgn.push_str(&format!("[White \"{}\"]\n", record.white.name));
    pgn.push_str(&format!("[Black \"{}\"]\n", record.black.name));
    pgn.push_str(&format!("[ExperimentID \"{}\"]\n", record.experiment_id));
    pgn.push_str(&format!("[RunID \"{}\"]\n", record.run_id));
    pgn.push_str(&format!(
        "[Date \"{}\"]\n",
        record.started_at.format("%Y-%m-%d")
    ));
    pgn.push_str(&format!(
        "[Time \"{}\"]\n",
        record.started_at.format("%H:%M:%S")
    ));
    pgn.push_str(&format!("[Termination \"{}\"]\n", record.termination));
    pgn.push_str(&format!("[Result \"{}\"]\n\n", record.outcome.pgn()));

    for (i, pair) in record.moves.chunks(2).enumerate() {
        pgn.push_str(&format!("{}. {}", i + 1, pair[0]));
        if let Some(reply) = pair.get(1) {
            pgn.push_str(&format!(" {}", reply));
        }
        pgn.push(' ');
    }
    pgn.push_str(record.outcome.pgn());
    pgn.push('\n');
    pgn
}

/// Append a game to the PGN log.
pub fn append_pgn(path: &Path, record: &GameRecord) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    writeln!(file, "{}", to_pgn(record))?;
    Ok(())
}

/// Print the final table to the console.
pub fn print_standings(standings: &[Standing], skipped: u32) {
    println!();
    println!("{:<24} {:>5} {:>6} {:>6} {:>8}", "Model", "Wins", "Losses", "Draws", "Rating");
    println!("{}", "-".repeat(52));
    for s in standings {
        println!(
            "{:<24} {:>5} {:>6} {:>6} {:>8.1}",
            s.name, s.wins, s.losses, s.draws, s.rating
        );
    }
    if skipped > 0 {
        println!("\n{} game(s) skipped due to backend failures", skipped);
    }
}
