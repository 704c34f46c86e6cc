//! Runtime settings: defaults, then an optional TOML file, then `PETRO_*`
//! environment variables, then command-line flags.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::feed::DEFAULT_FEED_URL;

pub const DEFAULT_DB_PATH: &str = "data/petroleum.db";
pub const DEFAULT_ERROR_LOG: &str = "error.log";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
  pub feed_url:  String,
  pub db_path:   PathBuf,
  /// Append-only log receiving run-fatal errors and skipped records.
  pub error_log: PathBuf,
}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub feed_url:  Option<String>,
  pub db_path:   Option<PathBuf>,
  pub error_log: Option<PathBuf>,
}

impl Settings {
  /// Resolve settings. `file` does not have to exist.
  pub fn load(file: &Path, overrides: &Overrides) -> Result<Self, ConfigError> {
    Config::builder()
      .set_default("feed_url", DEFAULT_FEED_URL)?
      .set_default("db_path", DEFAULT_DB_PATH)?
      .set_default("error_log", DEFAULT_ERROR_LOG)?
      .add_source(File::from(file).required(false))
      .add_source(Environment::with_prefix("PETRO"))
      .set_override_option("feed_url", overrides.feed_url.clone())?
      .set_override_option("db_path", overrides.db_path.as_deref().map(path_value))?
      .set_override_option("error_log", overrides.error_log.as_deref().map(path_value))?
      .build()?
      .try_deserialize()
  }
}

fn path_value(path: &Path) -> String { path.to_string_lossy().into_owned() }
