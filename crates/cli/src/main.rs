//! NoteVault CLI - Content queries and session checks.
//!
//! # Usage
//!
//! ```bash
//! # Print a note as JSON
//! nv-cli note intro-to-os
//!
//! # List notes, optionally filtered by classification
//! nv-cli notes --subject "Operating Systems" --year 2
//!
//! # Check whether a cookie header grants admin access
//! nv-cli session --cookie "authjs.session-token=..."
//! ```
//!
//! # Commands
//!
//! - `note`, `notes`, `slugs` - Query notes
//! - `deck`, `decks`, `quiz` - Query flashcards and quizzes
//! - `session` - Run the admin gate against a cookie header

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use notevault_web::sanity::NoteFilter;

mod commands;

#[derive(Parser)]
#[command(name = "nv-cli")]
#[command(author, version, about = "NoteVault CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a note by slug
    Note {
        /// Note slug (e.g. `intro-to-os`)
        slug: String,
    },
    /// List notes
    Notes {
        #[command(flatten)]
        filter: FilterArgs,

        /// Skip this many notes (unfiltered listing only)
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Return at most this many notes (unfiltered listing only)
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// List every note slug
    Slugs,
    /// Print a flashcard deck by slug
    Deck {
        /// Deck slug
        slug: String,
    },
    /// List the flashcard decks for a subject
    Decks {
        /// Subject name
        #[arg(short, long)]
        subject: String,
    },
    /// Print a quiz by slug
    Quiz {
        /// Quiz slug
        slug: String,
    },
    /// Check whether a session cookie grants admin access
    Session {
        /// Raw `Cookie` header value
        #[arg(short, long)]
        cookie: String,
    },
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long)]
    university: Option<String>,
    #[arg(long)]
    degree: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    semester: Option<String>,
    #[arg(long)]
    subject: Option<String>,
}

impl From<FilterArgs> for NoteFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            university: args.university,
            degree: args.degree,
            year: args.year,
            semester: args.semester,
            subject: args.subject,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Note { slug } => commands::content::note(&slug).await?,
        Commands::Notes {
            filter,
            offset,
            limit,
        } => commands::content::notes(&filter.into(), offset, limit).await?,
        Commands::Slugs => commands::content::slugs().await?,
        Commands::Deck { slug } => commands::content::deck(&slug).await?,
        Commands::Decks { subject } => commands::content::decks(&subject).await?,
        Commands::Quiz { slug } => commands::content::quiz(&slug).await?,
        Commands::Session { cookie } => commands::session::check(&cookie).await?,
    }
    Ok(())
}
