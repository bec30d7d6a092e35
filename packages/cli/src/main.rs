use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use wortschatz_cli::commands::{render_preview, render_stats};
use wortschatz_cli::config::{Config, PolicyKind};
use wortschatz_cli::{logging, App, CliResult};
use wortschatz_srs::{Clock, Grade, SystemClock};

#[derive(Parser)]
#[command(name = "wortschatz", version, about = "Spaced-repetition vocabulary review sessions")]
struct Cli {
    /// Progress file (JSON)
    #[arg(long, global = true)]
    progress: Option<PathBuf>,

    /// Vocabulary file (JSON array or one id per line)
    #[arg(long, global = true)]
    vocabulary: Option<PathBuf>,

    /// Maximum number of non-mastered items in learning
    #[arg(long, global = true)]
    pool_limit: Option<usize>,

    /// Session selection policy
    #[arg(long, global = true, value_enum)]
    policy: Option<PolicyKind>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the next session queue, one id per line
    Session {
        /// Shuffle seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,

        /// Keep plan order: due, mastered due, new
        #[arg(long)]
        no_shuffle: bool,
    },

    /// Grade an item (0/3/4/5 or forgot/hard/good/easy) and save progress
    Grade { item_id: String, grade: String },

    /// Show what each grade would do to an item
    Preview { item_id: String },

    /// Pool statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List mastered items in vocabulary order
    Mastered,
}

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(path) = cli.progress {
        config.progress_path = path;
    }
    if let Some(path) = cli.vocabulary {
        config.vocabulary_path = path;
    }
    if let Some(limit) = cli.pool_limit {
        config.pool_limit = limit;
    }
    if let Some(policy) = cli.policy {
        config.policy = policy;
    }

    let log_guard = logging::init_tracing(&config.log_level, config.log_dir.as_deref());

    let code = match run(cli.command, &config) {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            1
        }
    };

    drop(log_guard);
    process::exit(code);
}

fn run(command: Commands, config: &Config) -> CliResult<()> {
    let app = App::new(config, SystemClock)?;

    match command {
        Commands::Session { seed, no_shuffle } => {
            for id in app.session(!no_shuffle, seed)? {
                println!("{id}");
            }
        }
        Commands::Grade { item_id, grade } => {
            let grade: Grade = grade.parse()?;
            let record = app.grade(&item_id, grade)?;
            println!("{}", to_json(&record)?);
        }
        Commands::Preview { item_id } => {
            let now = app.scheduler().clock().now_ms();
            let outcomes = app.preview(&item_id)?;
            print!("{}", render_preview(&outcomes, now));
        }
        Commands::Stats { json } => {
            let report = app.stats()?;
            if json {
                println!("{}", to_json(&report)?);
            } else {
                print!("{}", render_stats(&report));
            }
        }
        Commands::Mastered => {
            for id in app.mastered()? {
                println!("{id}");
            }
        }
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
