use anyhow::Context;
use clap::{Parser, Subcommand};
use flashcards_app::models::selector;
use flashcards_app::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Spaced repetition flashcards.
#[derive(Parser)]
#[command(name = "flashcards", version, about)]
struct Cli {
    /// SQLite database holding the items
    #[arg(long, global = true, default_value = "flashcards.sqlite3")]
    db: PathBuf,

    /// TOML scheduler config; saved to the database when given
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new card
    Add { front: String, back: String },

    /// List cards, optionally filtered by text
    List {
        #[arg(long)]
        search: Option<String>,
    },

    /// List cards due today
    Due,

    /// Grade a single card (again, hard, good, easy or 1-4)
    Review { id: String, grade: Grade },

    /// Review all due cards interactively
    Study,

    /// Show learning statistics
    Stats,

    /// Move the simulated date one day forward
    AdvanceDay,

    /// Delete a card
    Delete { id: String },

    /// Write all cards to a JSON file
    Export { path: PathBuf },

    /// Add cards from a JSON file
    Import { path: PathBuf },

    /// Add a few sample cards
    Seed,

    /// Print the effective scheduler config
    Config,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("flashcards=info,flashcards_app=info")),
        )
        .init();

    let cli = Cli::parse();

    let today = chrono::Local::now().date_naive();
    let mut store = SqliteStore::open(&cli.db, today)
        .with_context(|| format!("failed to open {}", cli.db.display()))?;

    let config = match &cli.config {
        Some(path) => {
            let config = SchedulerConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            store.save_config(&config)?;
            config
        }
        None => store.load_config()?,
    };

    let today = store.current_date()?;

    match cli.command {
        Command::Add { front, back } => {
            let item = ReviewItem::new(front, back, today);
            store.insert_item(&item)?;
            println!("{}", item.id);
        }
        Command::List { search } => {
            let items = store.all_items()?;
            for item in selector::search(&items, search.as_deref().unwrap_or("")) {
                print_item(item);
            }
        }
        Command::Due => {
            for item in store.due_items(today)? {
                print_item(&item);
            }
        }
        Command::Review { id, grade } => {
            let item = store.review_item(&id, grade, &config, today)?;
            println!(
                "{}: next review {} (interval {} days, ease {:.2})",
                item.front, item.next_review, item.interval, item.ease_factor
            );
        }
        Command::Study => study(&mut store, &config, today)?,
        Command::Stats => {
            let stats = Statistics::from_items(&store.all_items()?, today);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::AdvanceDay => {
            println!("Current date: {}", store.advance_day()?);
        }
        Command::Delete { id } => store.delete_item(&id)?,
        Command::Export { path } => {
            export::export_json_to_path(&store.all_items()?, &path)?;
        }
        Command::Import { path } => {
            let items = export::import_json(&path)?;
            let imported = import_items(&mut store, &items)?;
            println!("Imported {imported} of {} cards", items.len());
        }
        Command::Seed => {
            for (front, back) in [("cześć", "hello"), ("dziękuję", "thank you"), ("proszę", "please")] {
                store.insert_item(&ReviewItem::new(front, back, today))?;
            }
            println!("Sample data created!");
        }
        Command::Config => {
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Inserts every item, skipping ids that already exist. Returns how many were added.
fn import_items<S: ItemStore + ?Sized>(
    store: &mut S,
    items: &[ReviewItem],
) -> Result<usize, StoreError> {
    let mut imported = 0;
    for item in items {
        match store.insert_item(item) {
            Ok(()) => imported += 1,
            Err(StoreError::Duplicate(id)) => {
                tracing::warn!(%id, "skipped item with existing id");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(imported)
}

fn print_item(item: &ReviewItem) {
    println!(
        "{}  {} | {}  (next {}, interval {}, reps {}, ease {:.2})",
        item.id,
        item.front,
        item.back,
        item.next_review,
        item.interval,
        item.repetition,
        item.ease_factor
    );
}

fn study(
    store: &mut SqliteStore,
    config: &SchedulerConfig,
    today: chrono::NaiveDate,
) -> anyhow::Result<()> {
    let mut session = ReviewSession::from_store(&*store, today)?;
    if session.is_completed() {
        println!("No cards due");
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut round = 0;

    while let Some(item) = session.current_item() {
        if session.round_number() != round {
            round = session.round_number();
            println!("{}", session.phase_message());
        }

        println!("\n{}", item.front);
        print!("[enter to reveal] ");
        io::stdout().flush()?;
        if lines.next().transpose()?.is_none() {
            break;
        }
        session.toggle_answer();
        if let Some(item) = session.current_item() {
            println!("{}", item.back);
        }

        let grade = loop {
            print!("again / hard / good / easy: ");
            io::stdout().flush()?;
            let Some(line) = lines.next().transpose()? else {
                return Ok(());
            };
            match line.parse::<Grade>() {
                Ok(grade) => break grade,
                Err(e) => println!("{e}"),
            }
        };

        if let Some(item) = session.grade_current(grade, config, today, &mut *store)? {
            println!("next review {} ({} days)", item.next_review, item.interval);
        }
    }

    println!("\nSession complete: {} reviews", session.reviewed_count());
    Ok(())
}
