//! llmchess CLI
//!
//! Commands:
//! - tournament: Run a full tournament from a roster file
//! - play: Play a single game between two roster agents

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use llmchess_tournament::{
    build_matchups, create_rng, play_game, run_tournament_with, GameConfig, GameEvent,
    TournamentConfig,
};
use llmchess_uci::UciEngine;

mod persist;
mod roster;

#[derive(Parser)]
#[command(name = "llmchess")]
#[command(about = "LLM chess benchmarking harness")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    /// Round-robin between all agents
    Mixed,
    /// Every agent against the reference engine
    VsReference,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full tournament from a roster file
    Tournament {
        /// Roster JSON listing the agents
        #[arg(long)]
        roster: String,
        /// UCI engine used for move scoring
        #[arg(long)]
        analyzer: String,
        #[arg(long, value_enum, default_value = "mixed")]
        policy: Policy,
        /// Games per pairing
        #[arg(long, default_value = "3")]
        games: usize,
        /// Reference agent name for vs-reference scheduling
        #[arg(long, default_value = "stockfish")]
        reference: String,
        /// Directory for CSV and PGN output
        #[arg(long, default_value = "results")]
        out_dir: PathBuf,
        #[arg(long, default_value = "default")]
        experiment_id: String,
        /// Per-move wall-clock budget in seconds
        #[arg(long, default_value = "120")]
        move_deadline: u64,
        #[arg(long, default_value = "100")]
        max_plies: u32,
        #[arg(long, default_value = "3")]
        top_n: usize,
        /// Seed for reproducible scheduling and fallback moves
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play a single game between two roster agents
    Play {
        #[arg(long)]
        roster: String,
        #[arg(long)]
        analyzer: String,
        /// Roster name of the white player
        #[arg(long)]
        white: String,
        /// Roster name of the black player
        #[arg(long)]
        black: String,
        #[arg(long, default_value = "120")]
        move_deadline: u64,
        #[arg(long, default_value = "100")]
        max_plies: u32,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tournament {
            roster,
            analyzer,
            policy,
            games,
            reference,
            out_dir,
            experiment_id,
            move_deadline,
            max_plies,
            top_n,
            seed,
        } => run_tournament_command(TournamentArgs {
            roster,
            analyzer,
            policy,
            games,
            reference,
            out_dir,
            experiment_id,
            move_deadline,
            max_plies,
            top_n,
            seed,
        }),
        Commands::Play {
            roster,
            analyzer,
            white,
            black,
            move_deadline,
            max_plies,
            seed,
        } => run_play_command(roster, analyzer, white, black, move_deadline, max_plies, seed),
    }
}

struct TournamentArgs {
    roster: String,
    analyzer: String,
    policy: Policy,
    games: usize,
    reference: String,
    out_dir: PathBuf,
    experiment_id: String,
    move_deadline: u64,
    max_plies: u32,
    top_n: usize,
    seed: Option<u64>,
}

fn run_tournament_command(args: TournamentArgs) -> Result<()> {
    let mut participants = roster::load_participants(&args.roster)?;
    let mut analyzer =
        UciEngine::spawn(&args.analyzer).context("failed to start the analysis engine")?;

    let run_id = Utc::now().format("%Y%m%d-%H%M%S").to_string();
    let game = GameConfig::default()
        .with_move_deadline(Duration::from_secs(args.move_deadline))
        .with_max_plies(args.max_plies)
        .with_top_n(args.top_n)
        .with_run_ids(&args.experiment_id, &run_id);
    let mut config = match args.policy {
        Policy::Mixed => TournamentConfig::mixed(args.games),
        Policy::VsReference => {
            TournamentConfig::vs_reference(args.games).with_reference_name(&args.reference)
        }
    }
    .with_game(game);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;
    let game_csv = args.out_dir.join("game_data.csv");
    let pgn_log = args.out_dir.join(format!("games-{}.pgn", run_id));
    let results_csv = args.out_dir.join("tournament_results.csv");

    let total = build_matchups(&participants, &config)?.len();
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40}] {pos}/{len} games ({eta})")
            .context("valid template")?
            .progress_chars("=> "),
    );

    let mut persist_error: Option<anyhow::Error> = None;
    let report = run_tournament_with(&mut participants, &mut analyzer, &config, |event| {
        if let GameEvent::Completed(record) = event {
            if persist_error.is_none() {
                persist_error = persist::append_game_rows(&game_csv, record)
                    .and_then(|_| persist::append_pgn(&pgn_log, record))
                    .err();
            }
        }
        bar.inc(1);
    })?;
    bar.finish();
    if let Some(err) = persist_error {
        return Err(err.context("failed to record game results"));
    }

    persist::write_results_csv(&results_csv, &report.standings)?;
    persist::print_standings(&report.standings, report.skipped);
    println!("\nResults written to {}", args.out_dir.display());
    Ok(())
}

fn run_play_command(
    roster: String,
    analyzer: String,
    white: String,
    black: String,
    move_deadline: u64,
    max_plies: u32,
    seed: Option<u64>,
) -> Result<()> {
    let participants = roster::load_participants(&roster)?;
    let mut analyzer =
        UciEngine::spawn(&analyzer).context("failed to start the analysis engine")?;

    let find = |name: &str| {
        participants
            .iter()
            .position(|p| p.agent.name.eq_ignore_ascii_case(name))
    };
    let (Some(white_idx), Some(black_idx)) = (find(&white), find(&black)) else {
        bail!("both '{}' and '{}' must appear in the roster", white, black);
    };
    if white_idx == black_idx {
        bail!("white and black must be different agents");
    }

    let mut participants = participants;
    let (w, b) = if white_idx < black_idx {
        let (left, right) = participants.split_at_mut(black_idx);
        (&mut left[white_idx], &mut right[0])
    } else {
        let (left, right) = participants.split_at_mut(white_idx);
        (&mut right[0], &mut left[black_idx])
    };

    let run_id = Utc::now().format("%Y%m%d-%H%M%S").to_string();
    let config = GameConfig::default()
        .with_move_deadline(Duration::from_secs(move_deadline))
        .with_max_plies(max_plies)
        .with_run_ids("single-game", &run_id);
    let mut rng = create_rng(seed);

    let record = play_game(w, b, &mut analyzer, &config, &mut rng)?;

    println!("{}", persist::to_pgn(&record));
    match record.winner() {
        Some(name) => println!("{} wins by {}", name, record.termination),
        None => println!("Draw by {}", record.termination),
    }
    Ok(())
}
