//! `revsent`: product reviews with automatic sentiment scoring.
//!
//! Reviews live in a DuckDB file (or in memory with `--in-memory`). Every
//! command that writes review text scores it on the way in.

mod display;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use revsent_core::{NewReview, Review, ReviewId, ReviewPatch};
use revsent_sentiment::{Lexicon, Scorer};
use revsent_store::{DuckStore, MemoryStore, ReviewService, ReviewStore, ServiceError};
use serde_json::json;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "revsent", version, propagate_version = true)]
#[command(about = "Product reviews with automatic sentiment scoring")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// DuckDB database file
    #[arg(long, env = "REVSENT_DB", default_value = "revsent.duckdb", global = true)]
    db: PathBuf,

    /// Use a fresh, empty in-memory store instead of --db. Nothing is saved,
    /// so every invocation starts with no reviews
    #[arg(long, global = true)]
    in_memory: bool,

    /// Caller identity; reviews are owned by this user
    #[arg(long, env = "REVSENT_USER", global = true)]
    user: Option<String>,

    /// JSON object of extra word weights, e.g. {"flimsy": -3}
    #[arg(long, env = "REVSENT_LEXICON_EXTRAS", global = true)]
    lexicon_extras: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze text without storing anything
    Score { text: String },
    /// Run SQL against the database and pretty-print the result
    Query { sql: String },
    #[command(flatten)]
    Review(ReviewCommand),
}

/// Commands that go through the review workflow.
#[derive(Subcommand)]
enum ReviewCommand {
    /// Create a review owned by --user
    Create {
        #[arg(long)]
        product: String,
        #[arg(long)]
        text: String,
        #[arg(long, allow_negative_numbers = true)]
        rating: i64,
    },
    /// List the caller's reviews, newest first
    List,
    /// List every review, newest first
    All,
    /// Show one of the caller's reviews
    Get { id: i64 },
    /// Edit one of the caller's reviews; new text is re-scored
    Update {
        id: i64,
        #[arg(long)]
        product: Option<String>,
        #[arg(long)]
        text: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        rating: Option<i64>,
    },
    /// Delete one of the caller's reviews
    Delete { id: i64 },
    /// Sentiment statistics over the caller's reviews
    Stats,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("revsent v{}", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ServiceError>() {
                Some(svc_err) => {
                    if let ServiceError::Store(inner) = svc_err {
                        tracing::error!(error = %inner, "store failure");
                    }
                    eprintln!("{}: {}", svc_err.status_code(), svc_err.public_message());
                }
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        db,
        in_memory,
        user,
        lexicon_extras,
        json,
        command,
        ..
    } = cli;

    let scorer = Scorer::new(load_lexicon(lexicon_extras.as_deref())?);

    match command {
        Command::Score { text } => {
            let analysis = scorer.analyze(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                display::print_analysis(&analysis);
            }
        }
        Command::Query { sql } => {
            let store = DuckStore::open_persistent(&db)
                .with_context(|| format!("opening {}", db.display()))?;
            let batches = store.query_arrow(&sql)?;
            println!("{}", arrow::util::pretty::pretty_format_batches(&batches)?);
        }
        Command::Review(command) => {
            let store = open_store(&db, in_memory)?;
            let svc = ReviewService::new(store, scorer);
            let caller = user.as_deref().unwrap_or_default();
            dispatch(&svc, caller, command, json)?;
        }
    }
    Ok(())
}

fn dispatch<S: ReviewStore>(
    svc: &ReviewService<S>,
    caller: &str,
    command: ReviewCommand,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        ReviewCommand::Create {
            product,
            text,
            rating,
        } => {
            let input = NewReview {
                product_name: product,
                review_text: text,
                rating,
            };
            let review = svc.create(caller, input)?;
            report_review("Review created successfully", &review, json)?;
        }
        ReviewCommand::List => {
            let reviews = svc.list_mine(caller)?;
            report_reviews(&reviews, json)?;
        }
        ReviewCommand::All => {
            let reviews = svc.list_all()?;
            report_reviews(&reviews, json)?;
        }
        ReviewCommand::Get { id } => {
            let review = svc.get(caller, ReviewId(id))?;
            report_review("Review retrieved successfully", &review, json)?;
        }
        ReviewCommand::Update {
            id,
            product,
            text,
            rating,
        } => {
            let patch = ReviewPatch {
                product_name: product,
                review_text: text,
                rating,
            };
            let review = svc.update(caller, ReviewId(id), patch)?;
            report_review("Review updated successfully", &review, json)?;
        }
        ReviewCommand::Delete { id } => {
            svc.delete(caller, ReviewId(id))?;
            if json {
                display::print_envelope("Review deleted successfully", vec![("id", json!(id))])?;
            } else {
                println!("Review deleted successfully");
            }
        }
        ReviewCommand::Stats => {
            let stats = svc.sentiment_stats(caller)?;
            if json {
                display::stats_json(&stats)?;
            } else {
                display::print_stats(&stats);
            }
        }
    }
    Ok(())
}

fn report_review(message: &str, review: &Review, json: bool) -> anyhow::Result<()> {
    if json {
        display::print_envelope(message, vec![("review", serde_json::to_value(review)?)])
    } else {
        println!("{message}");
        display::print_review_card(review);
        Ok(())
    }
}

fn report_reviews(reviews: &[Review], json: bool) -> anyhow::Result<()> {
    let message = if reviews.is_empty() {
        "No reviews found"
    } else {
        "Reviews retrieved successfully"
    };
    if json {
        display::reviews_json(message, reviews)
    } else {
        display::print_review_table(reviews);
        Ok(())
    }
}

fn open_store(db: &Path, in_memory: bool) -> anyhow::Result<Box<dyn ReviewStore>> {
    if in_memory {
        return Ok(Box::new(MemoryStore::new()));
    }
    let store =
        DuckStore::open_persistent(db).with_context(|| format!("opening {}", db.display()))?;
    Ok(Box::new(store))
}

fn load_lexicon(path: Option<&Path>) -> anyhow::Result<Lexicon> {
    let Some(path) = path else {
        return Ok(Lexicon::new());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading lexicon extras {}", path.display()))?;
    let lexicon = Lexicon::from_json(&raw)
        .with_context(|| format!("parsing lexicon extras {}", path.display()))?;
    tracing::info!(
        extras = lexicon.extras_len(),
        words = lexicon.word_count(),
        path = %path.display(),
        "loaded lexicon extras"
    );
    Ok(lexicon)
}
