//! The `SalesStore` trait and its import types.
//!
//! The trait is implemented by storage backends (e.g. `petro-store-sqlite`).
//! The importer and reporter in `petro-report` depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::{
  record::SaleRecord,
  sale::{Country, Product, Sale, SaleFact, Year},
};

// ─── Import types ────────────────────────────────────────────────────────────

/// What happens to existing fact rows when a batch is imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
  /// Keep existing facts; re-importing the same feed duplicates them.
  #[default]
  Append,
  /// Delete every fact row in the same transaction before inserting.
  /// Dimension rows are always kept.
  Replace,
}

/// Outcome of one [`SalesStore::import`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
  /// Fact rows written.
  pub inserted:      usize,
  /// Records dropped because one of their statements failed.
  pub failed_writes: usize,
  /// Fact rows deleted up front by [`ImportMode::Replace`].
  pub cleared:       usize,
}

/// Row counts of the four tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableCounts {
  pub countries: usize,
  pub products:  usize,
  pub years:     usize,
  pub sales:     usize,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a normalized sales store.
///
/// Dimension rows (countries, products, years) are created on first use and
/// never updated or deleted. Fact rows are append-only unless an import runs
/// in [`ImportMode::Replace`].
pub trait SalesStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Import a batch of validated records as a single transaction.
  ///
  /// Each record resolves (or creates) its country, product and year rows and
  /// appends one fact row. A statement that fails only drops its own record;
  /// the rest of the batch still commits.
  fn import(
    &self,
    records: Vec<SaleRecord>,
    mode: ImportMode,
  ) -> impl Future<Output = Result<ImportSummary, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Every fact row joined with its dimensions. Input to the reports.
  fn sale_facts(&self) -> impl Future<Output = Result<Vec<SaleFact>, Self::Error>> + Send + '_;

  fn countries(&self) -> impl Future<Output = Result<Vec<Country>, Self::Error>> + Send + '_;

  fn products(&self) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + '_;

  fn years(&self) -> impl Future<Output = Result<Vec<Year>, Self::Error>> + Send + '_;

  /// Raw fact rows, foreign keys only.
  fn sales(&self) -> impl Future<Output = Result<Vec<Sale>, Self::Error>> + Send + '_;

  fn counts(&self) -> impl Future<Output = Result<TableCounts, Self::Error>> + Send + '_;
}
