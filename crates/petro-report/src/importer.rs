//! The importer: fetch the feed, validate each element, and load the batch.

use petro_core::{
  record::SaleRecord,
  store::{ImportMode, ImportSummary, SalesStore},
};
use serde_json::Value;
use thiserror::Error;

use crate::feed::{FeedClient, FeedError};

/// A failure that aborts the whole import. Nothing is committed.
#[derive(Debug, Error)]
pub enum ImportError {
  #[error(transparent)]
  Feed(#[from] FeedError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// What one import run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportOutcome {
  /// Elements in the feed array.
  pub received:          usize,
  /// Elements dropped by validation.
  pub skipped_malformed: usize,
  pub store:             ImportSummary,
}

/// Loads feed data into a [`SalesStore`].
pub struct Importer<'a, S> {
  store: &'a S,
}

impl<'a, S: SalesStore> Importer<'a, S> {
  pub fn new(store: &'a S) -> Self { Self { store } }

  /// Fetch the feed and import it. Any fetch failure aborts before the
  /// store is touched.
  pub async fn run(
    &self,
    feed: &FeedClient,
    mode: ImportMode,
  ) -> Result<ImportOutcome, ImportError> {
    tracing::debug!(url = feed.url(), "fetching feed");
    let values = feed.fetch().await?;
    self.import_values(values, mode).await
  }

  /// Validate already-fetched feed elements and import the valid ones.
  pub async fn import_values(
    &self,
    values: Vec<Value>,
    mode: ImportMode,
  ) -> Result<ImportOutcome, ImportError> {
    let received = values.len();
    let records  = validate(values);
    let valid    = records.len();

    let store = self
      .store
      .import(records, mode)
      .await
      .map_err(|e| ImportError::Store(Box::new(e)))?;

    Ok(ImportOutcome {
      received,
      skipped_malformed: received - valid,
      store,
    })
  }
}

/// Keep the elements that form valid records, logging the rest.
pub fn validate(values: Vec<Value>) -> Vec<SaleRecord> {
  values
    .into_iter()
    .enumerate()
    .filter_map(|(index, value)| match SaleRecord::from_value(value) {
      Ok(record) => Some(record),
      Err(e) => {
        tracing::warn!(index, error = %e, "skipping malformed feed record");
        None
      }
    })
    .collect()
}
