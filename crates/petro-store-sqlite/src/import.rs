//! Batch import of validated records into the normalized schema.
//!
//! Runs synchronously on the connection thread, against the open import
//! transaction. Committing is left to the caller.

use petro_core::{
  record::SaleRecord,
  store::{ImportMode, ImportSummary},
};
use rusqlite::Connection;

use crate::dimension::{COUNTRIES, DimensionCache, PRODUCTS, YEARS};

/// The three get-or-create caches of one import.
struct Dimensions {
  countries: DimensionCache<String>,
  products:  DimensionCache<String>,
  years:     DimensionCache<i32>,
}

impl Dimensions {
  fn new() -> Self {
    Self {
      countries: DimensionCache::new(COUNTRIES),
      products:  DimensionCache::new(PRODUCTS),
      years:     DimensionCache::new(YEARS),
    }
  }

  /// Resolve the record's dimensions and append its fact row.
  fn insert_sale(&mut self, conn: &Connection, record: &SaleRecord) -> rusqlite::Result<()> {
    let country_id = self.countries.resolve(conn, record.country.as_str())?;
    let product_id = self.products.resolve(conn, record.product.as_str())?;
    let year_id    = self.years.resolve(conn, &record.year)?;

    conn
      .prepare_cached(
        "INSERT INTO sales (country_id, product_id, year_id, sale) VALUES (?1, ?2, ?3, ?4)",
      )?
      .execute(rusqlite::params![country_id, product_id, year_id, record.amount])?;
    Ok(())
  }
}

/// Write `records` through `conn`.
///
/// A failing statement costs only its own record: the failure is logged and
/// counted, and the loop moves on. Errors outside the per-record loop (the
/// up-front delete of [`ImportMode::Replace`]) abort the batch.
pub fn import_batch(
  conn: &Connection,
  records: &[SaleRecord],
  mode: ImportMode,
) -> rusqlite::Result<ImportSummary> {
  let mut summary = ImportSummary::default();

  if mode == ImportMode::Replace {
    summary.cleared = conn.execute("DELETE FROM sales", [])?;
    tracing::info!(cleared = summary.cleared, "cleared existing sales before import");
  }

  let mut dimensions = Dimensions::new();
  for record in records {
    match dimensions.insert_sale(conn, record) {
      Ok(()) => summary.inserted += 1,
      Err(e) => {
        tracing::warn!(
          country = %record.country,
          product = %record.product,
          year = record.year,
          sale = record.amount,
          error = %e,
          "failed to store sale record, skipping"
        );
        summary.failed_writes += 1;
      }
    }
  }

  tracing::debug!(
    countries = dimensions.countries.len(),
    products = dimensions.products.len(),
    years = dimensions.years.len(),
    "resolved dimensions"
  );

  Ok(summary)
}
