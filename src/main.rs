mod cli;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use strata::config::StrataConfig;

#[derive(Parser)]
#[command(name = "strata", version, about = "Memory relevance scoring and SM-2 retention")]
struct Cli {
    /// Config file (defaults to ~/.strata/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank a JSON memory bundle and print the top-K selection per layer
    Rank {
        /// Path to a JSON file with episodic/semantic/procedural/working arrays
        file: PathBuf,
        /// Total entries to select (defaults to ranking.top_k)
        #[arg(long)]
        top_k: Option<usize>,
        /// Reference time as RFC 3339 (defaults to now)
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Score every entry of a bundle and print the cross-layer score
    Score {
        file: PathBuf,
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Apply one SM-2 review to a retention state
    Review {
        /// Recall quality, 0 (blackout) to 5 (perfect)
        #[arg(long)]
        quality: u8,
        /// Current state as JSON (defaults to a fresh memory)
        #[arg(long)]
        state: Option<String>,
        /// Time of this review, used to report the next due date
        #[arg(long)]
        reviewed_at: Option<DateTime<Utc>>,
    },
    /// Print the JSON schema of an input document
    Schema {
        #[arg(value_enum, default_value_t = cli::schema::SchemaTarget::Bundle)]
        target: cli::schema::SchemaTarget,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => StrataConfig::load_from(path)?,
        None => StrataConfig::load()?,
    };

    // Log to stderr so stdout stays clean JSON.
    let filter =
        EnvFilter::try_new(&config.log.level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Rank { file, top_k, now } => cli::rank::rank(&config, &file, top_k, now),
        Command::Score { file, now } => cli::score::score(&config, &file, now),
        Command::Review {
            quality,
            state,
            reviewed_at,
        } => cli::review::review(quality, state.as_deref(), reviewed_at),
        Command::Schema { target } => cli::schema::schema(target),
    }
}
