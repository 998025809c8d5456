//! corredor-inbox - search a mailbox snapshot from the terminal
//!
//! Loads threads from a JSON snapshot, applies a search query or folder
//! tab, and prints one page of results with the active filter chips.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use inbox::{
    Folder, InboxSession, InboxSettings, JsonFileThreadStore, ThreadId, ThreadSummary,
    apply_suggestion,
};
use log::{error, warn};
use std::path::PathBuf;
use std::sync::Arc;

/// Default snapshot filename in the Corredor config directory
const SNAPSHOT_FILE: &str = "threads.json";

#[derive(Debug, Parser)]
#[command(name = "corredor-inbox", about = "Search a Corredor mailbox snapshot")]
struct Cli {
    /// Thread snapshot (JSON array of threads)
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Settings file; defaults to inbox.json in the config directory
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Search query, e.g. 'from:juan is:unread "depto centro"'
    #[arg(short, long, default_value = "")]
    query: String,

    /// Operator suggestions to apply to the query, in order
    #[arg(long = "apply", value_name = "OPERATOR")]
    apply: Vec<String>,

    /// Folder tab when no query is given
    #[arg(short, long, default_value = "inbox", value_parser = parse_folder)]
    folder: Folder,

    /// Zero-based result page
    #[arg(short, long, default_value_t = 0)]
    page: usize,

    /// Threads to mark read before listing
    #[arg(long = "mark-read", value_name = "THREAD_ID")]
    mark_read: Vec<String>,

    /// Print autocomplete suggestions for the query
    #[arg(long)]
    suggest: bool,
}

fn parse_folder(s: &str) -> Result<Folder, String> {
    Folder::from_id(s).ok_or_else(|| {
        let known: Vec<&str> = Folder::ALL.iter().map(|f| f.id()).collect();
        format!("unknown folder '{}', expected one of: {}", s, known.join(", "))
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    let settings = match &cli.settings {
        Some(path) => InboxSettings::from_file(path)?,
        None => InboxSettings::load().unwrap_or_else(|e| {
            warn!("Ignoring inbox settings: {:#}", e);
            InboxSettings::default()
        }),
    };

    let snapshot = match cli.snapshot.clone() {
        Some(path) => path,
        None => {
            if !config::config_exists(SNAPSHOT_FILE) {
                warn!("No {} in the config directory; pass --snapshot", SNAPSHOT_FILE);
            }
            config::config_path(SNAPSHOT_FILE).context("Could not determine config directory")?
        }
    };

    let store = Arc::new(JsonFileThreadStore::new(snapshot));
    let mut session = InboxSession::new(store, settings);
    if !session.refresh_if_due(Utc::now()) {
        warn!("No threads loaded; showing an empty mailbox");
    }

    for id in &cli.mark_read {
        session.mark_read(&ThreadId::new(id.as_str()));
    }

    let query = cli
        .apply
        .iter()
        .fold(cli.query.clone(), |input, label| apply_suggestion(&input, label));

    session.set_folder(cli.folder);
    session.set_search_text(query);
    session.set_page(cli.page);

    print_session(&session, cli.suggest);

    session.wait_for_writes();
    Ok(())
}

fn print_session(session: &InboxSession, show_suggestions: bool) {
    if session.search_text().trim().is_empty() {
        println!(
            "Carpeta: {} ({} sin leer)",
            session.folder(),
            session.unread_count(session.folder())
        );
    } else {
        println!("Búsqueda: {}", session.search_text());
    }

    let chips = session.active_chips();
    if !chips.is_empty() {
        let labels: Vec<String> = chips.into_iter().map(|c| format!("[{}]", c.label)).collect();
        println!("Filtros: {}", labels.join(" "));
    }

    let rows = session.visible_threads();
    println!(
        "{} resultados, página {} de {}",
        session.result_count(),
        session.page() + 1,
        session.page_count().max(1)
    );
    for row in &rows {
        println!("{}", format_row(row));
    }

    if show_suggestions {
        println!();
        for suggestion in session.suggestions() {
            let marker = if suggestion.active { "*" } else { " " };
            println!(
                "{} {:<16} {}",
                marker, suggestion.operator.label, suggestion.operator.description
            );
        }
    }
}

fn format_row(row: &ThreadSummary) -> String {
    let unread = if row.is_unread { "●" } else { " " };
    let star = if row.is_starred { "★" } else { " " };
    let date = row
        .last_message_at
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "sin fecha       ".to_string());
    format!(
        "{}{} {}  {:<24}  {} - {}",
        unread, star, date, row.sender_display, row.subject, row.snippet
    )
}
