//! quizbank CLI — browse, filter, and favorite quiz questions.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizbank", version, about = "Browse and filter a quiz question bank")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the bank and the persisted favorites live.
#[derive(Args, Clone, Debug, Default)]
pub struct SourceArgs {
    /// Question bank file or http(s) URL (overrides config)
    #[arg(long)]
    questions: Option<String>,

    /// Storage file for favorites (overrides config)
    #[arg(long)]
    storage: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List visible questions for a filter selection
    List {
        /// Only these difficulties (comma-separated, 1-5)
        #[arg(long, value_delimiter = ',')]
        difficulty: Vec<u8>,

        /// Only questions in at least one of these categories (comma-separated)
        #[arg(long, value_delimiter = ',')]
        category: Vec<String>,

        /// Case-insensitive text to find in question or answer
        #[arg(long)]
        search: Option<String>,

        /// Sort order: difficulty, alphabetical
        #[arg(long, default_value = "difficulty")]
        sort: String,

        /// Show only favorite questions
        #[arg(long)]
        favorites_only: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Add or remove a question from favorites
    Favorite {
        /// Question id
        id: u32,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show all favorite questions
    Favorites {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show how many questions exist per difficulty and category
    Facets {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Create starter config and sample question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("quizbank=info,quizbank_core=info")
            }),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List {
            difficulty,
            category,
            search,
            sort,
            favorites_only,
            format,
            source,
        } => {
            commands::list::execute(
                difficulty,
                category,
                search,
                sort,
                favorites_only,
                format,
                source,
            )
            .await
        }
        Commands::Favorite { id, source } => commands::favorite::execute(id, source).await,
        Commands::Favorites { source } => commands::favorites::execute(source).await,
        Commands::Facets { source } => commands::facets::execute(source).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
