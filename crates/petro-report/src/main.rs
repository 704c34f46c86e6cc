//! `petroleum-report`: import the petroleum sales feed, then print a report.
//!
//! # Usage
//!
//! ```text
//! petroleum-report totalsales
//! petroleum-report --db data/petroleum.db --replace top3countries
//! petroleum-report --config petroleum.toml averagesales
//! ```
//!
//! The import always runs first. Fatal import errors go to the error log,
//! never to standard output, and the report is then produced from whatever
//! the database already holds.

use std::{
  fs::{self, OpenOptions},
  path::{Path, PathBuf},
  process::ExitCode,
  sync::Mutex,
};

use anyhow::{Context as _, Result};
use clap::{CommandFactory as _, Parser, error::ErrorKind};
use petro_core::store::ImportMode;
use petro_report::{FeedClient, Importer, Overrides, Reporter, Settings};
use petro_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
  name = "petroleum-report",
  version,
  about = "Import the petroleum sales feed and print a report"
)]
struct Cli {
  /// Report to print: totalsales, top3countries or averagesales.
  query: Option<String>,

  /// Path to an optional TOML config file.
  #[arg(short, long, value_name = "FILE", default_value = "petroleum.toml")]
  config: PathBuf,

  /// URL of the JSON feed.
  #[arg(long, value_name = "URL")]
  feed_url: Option<String>,

  /// SQLite database file.
  #[arg(long, value_name = "FILE")]
  db: Option<PathBuf>,

  /// File that run-fatal errors are appended to.
  #[arg(long, value_name = "FILE")]
  error_log: Option<PathBuf>,

  /// Delete previously imported sales before importing.
  #[arg(long)]
  replace: bool,
}

impl Cli {
  fn overrides(&self) -> Overrides {
    Overrides {
      feed_url:  self.feed_url.clone(),
      db_path:   self.db.clone(),
      error_log: self.error_log.clone(),
    }
  }

  fn import_mode(&self) -> ImportMode {
    if self.replace { ImportMode::Replace } else { ImportMode::Append }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<ExitCode> {
  let cli = Cli::parse();

  let settings = Settings::load(&cli.config, &cli.overrides())
    .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

  init_logging(&settings.error_log)?;

  let store = match open_store(&settings.db_path).await {
    Ok(store) => store,
    Err(e) => {
      tracing::error!(path = %settings.db_path.display(), error = ?e, "failed to open database");
      return Ok(ExitCode::FAILURE);
    }
  };

  import(&store, &settings, cli.import_mode()).await;

  let Some(query) = cli.query.as_deref() else {
    close_store(store).await;
    missing_query().exit();
  };

  let exit = print_report(&store, query).await;
  close_store(store).await;
  Ok(exit)
}

// ─── Steps ────────────────────────────────────────────────────────────────────

/// Send all `tracing` output to `path`, appending.
fn init_logging(path: &Path) -> Result<()> {
  create_parent_dir(path)?;
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("failed to open error log {}", path.display()))?;

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .init();

  Ok(())
}

async fn open_store(path: &Path) -> Result<SqliteStore> {
  create_parent_dir(path)?;
  SqliteStore::open(path)
    .await
    .with_context(|| format!("failed to open store at {}", path.display()))
}

/// Run the import. Failures are logged and otherwise swallowed.
async fn import(store: &SqliteStore, settings: &Settings, mode: ImportMode) {
  let feed = match FeedClient::new(settings.feed_url.as_str()) {
    Ok(feed) => feed,
    Err(e) => {
      tracing::error!(error = %e, "failed to build feed client");
      return;
    }
  };

  match Importer::new(store).run(&feed, mode).await {
    Ok(outcome) => tracing::info!(
      url = feed.url(),
      received = outcome.received,
      skipped_malformed = outcome.skipped_malformed,
      inserted = outcome.store.inserted,
      failed_writes = outcome.store.failed_writes,
      cleared = outcome.store.cleared,
      "import finished"
    ),
    Err(e) => tracing::error!(url = feed.url(), error = %e, "import failed, nothing committed"),
  }
}

/// The usage error for a run without a query. Exits with status 2.
fn missing_query() -> clap::Error {
  Cli::command().error(
    ErrorKind::MissingRequiredArgument,
    "a query name is required: totalsales, top3countries or averagesales",
  )
}

async fn print_report(store: &SqliteStore, query: &str) -> ExitCode {
  match Reporter::new(store).answer(query).await {
    Ok(answer) => {
      print!("{}", answer.text());
      ExitCode::from(answer.exit_code())
    }
    Err(e) => {
      tracing::error!(query, error = %e, "failed to read sales");
      ExitCode::FAILURE
    }
  }
}

async fn close_store(store: SqliteStore) {
  if let Err(e) = store.close().await {
    tracing::error!(error = %e, "failed to close database");
  }
}

fn create_parent_dir(path: &Path) -> Result<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent)
      .with_context(|| format!("failed to create directory {}", parent.display()))?;
  }
  Ok(())
}
