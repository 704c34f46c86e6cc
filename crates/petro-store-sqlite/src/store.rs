//! [`SqliteStore`]: the SQLite implementation of [`SalesStore`].

use std::path::Path;

use petro_core::{
  record::SaleRecord,
  sale::{Country, Product, Sale, SaleFact, Year},
  store::{ImportMode, ImportSummary, SalesStore, TableCounts},
};

use crate::{Result, import::import_batch, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A sales store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mainly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Close the connection, surfacing any error SQLite reports on close.
  ///
  /// Other clones of this store stop working once this returns.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn count(&self, table: &'static str) -> Result<usize> {
    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| {
          r.get::<_, usize>(0)
        })?)
      })
      .await?;
    Ok(n)
  }
}

// ─── SalesStore impl ─────────────────────────────────────────────────────────

impl SalesStore for SqliteStore {
  type Error = crate::Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn import(&self, records: Vec<SaleRecord>, mode: ImportMode) -> Result<ImportSummary> {
    let summary = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let summary = import_batch(&tx, &records, mode)?;
        tx.commit()?;
        Ok(summary)
      })
      .await?;

    Ok(summary)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn sale_facts(&self) -> Result<Vec<SaleFact>> {
    let facts = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT c.country, p.product, y.year, s.sale
           FROM sales s
           JOIN countries c ON c.id = s.country_id
           JOIN products  p ON p.id = s.product_id
           JOIN years     y ON y.id = s.year_id
           ORDER BY s.id",
        )?;

        let rows = stmt
          .query_map([], |row| {
            Ok(SaleFact {
              country: row.get(0)?,
              product: row.get(1)?,
              year:    row.get(2)?,
              amount:  row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    Ok(facts)
  }

  async fn countries(&self) -> Result<Vec<Country>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, country FROM countries ORDER BY id")?;
        let rows = stmt
          .query_map([], |row| Ok(Country { id: row.get(0)?, name: row.get(1)? }))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn products(&self) -> Result<Vec<Product>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, product FROM products ORDER BY id")?;
        let rows = stmt
          .query_map([], |row| Ok(Product { id: row.get(0)?, name: row.get(1)? }))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn years(&self) -> Result<Vec<Year>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, year FROM years ORDER BY id")?;
        let rows = stmt
          .query_map([], |row| Ok(Year { id: row.get(0)?, value: row.get(1)? }))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn sales(&self) -> Result<Vec<Sale>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, country_id, product_id, year_id, sale FROM sales ORDER BY id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Sale {
              id:         row.get(0)?,
              country_id: row.get(1)?,
              product_id: row.get(2)?,
              year_id:    row.get(3)?,
              amount:     row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn counts(&self) -> Result<TableCounts> {
    Ok(TableCounts {
      countries: self.count("countries").await?,
      products:  self.count("products").await?,
      years:     self.count("years").await?,
      sales:     self.count("sales").await?,
    })
  }
}
