//! math-quiz command line.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::process;
use std::sync::Mutex;

use anyhow::Context;
use clap::{Parser, Subcommand};
use math_quiz::storage::UserStore;
use math_quiz::{GameConfig, Quiz};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "math-quiz", version, about = "Timed arithmetic quiz for the terminal")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the user, progress and log files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the game (default)
    Play,

    /// Print the top scores and exit
    Leaderboard {
        /// Number of players to show
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = GameConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => {
            init_logging(&config)?;
            Quiz::from_config(&config).run()?;
        }
        Commands::Leaderboard { limit } => {
            let users = UserStore::open(config.users_path());
            print_leaderboard(&users, limit.unwrap_or(config.leaderboard_size));
        }
    }

    Ok(())
}

/// Send tracing output to the log file; stdout belongs to the UI.
fn init_logging(config: &GameConfig) -> anyhow::Result<()> {
    let path = config.log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("math_quiz=info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

fn print_leaderboard(users: &UserStore, limit: usize) {
    use comfy_table::{Cell, Table};

    let entries = users.top_scores(limit);
    if entries.is_empty() {
        println!("No players yet.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Rank", "Player", "High score"]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.rank),
            Cell::new(entry.username),
            Cell::new(entry.high_score),
        ]);
    }

    println!("{table}");
}
