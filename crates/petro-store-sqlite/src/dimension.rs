//! Get-or-create resolution of dimension rows.
//!
//! Each dimension table maps one natural value (a country name, a product
//! name, a year) to a surrogate key. [`DimensionCache`] resolves a value to
//! its key, inserting the row the first time the value is seen, and remembers
//! every answer for the rest of the import.

use std::{borrow::Borrow, collections::HashMap, hash::Hash};

use petro_core::sale::RowId;
use rusqlite::{Connection, OptionalExtension as _, ToSql};

/// A dimension table and the column holding its natural value.
#[derive(Debug, Clone, Copy)]
pub struct Dimension {
  pub table:  &'static str,
  pub column: &'static str,
}

pub const COUNTRIES: Dimension = Dimension { table: "countries", column: "country" };
pub const PRODUCTS: Dimension = Dimension { table: "products", column: "product" };
pub const YEARS: Dimension = Dimension { table: "years", column: "year" };

/// Value-to-key cache for one dimension, scoped to a single import.
#[derive(Debug)]
pub struct DimensionCache<K> {
  dimension: Dimension,
  ids:       HashMap<K, RowId>,
}

impl<K> DimensionCache<K>
where
  K: Eq + Hash,
{
  pub fn new(dimension: Dimension) -> Self {
    Self { dimension, ids: HashMap::new() }
  }

  /// Return the key of the row holding `value`, inserting it if absent.
  ///
  /// Matching is exact: no trimming, no case folding. An existing row is
  /// never overwritten.
  pub fn resolve<Q>(&mut self, conn: &Connection, value: &Q) -> rusqlite::Result<RowId>
  where
    K: Borrow<Q>,
    Q: Eq + Hash + ToSql + ToOwned<Owned = K> + std::fmt::Debug + ?Sized,
  {
    if let Some(id) = self.ids.get(value) {
      return Ok(*id);
    }

    let Dimension { table, column } = self.dimension;

    let existing: Option<RowId> = conn
      .prepare_cached(&format!("SELECT id FROM {table} WHERE {column} = ?1"))?
      .query_row([value], |row| row.get(0))
      .optional()?;

    let id = match existing {
      Some(id) => id,
      None => {
        conn
          .prepare_cached(&format!("INSERT INTO {table} ({column}) VALUES (?1)"))?
          .execute([value])?;
        let id = conn.last_insert_rowid();
        tracing::debug!(table, ?value, id, "created dimension row");
        id
      }
    };

    self.ids.insert(value.to_owned(), id);
    Ok(id)
  }

  /// Number of values resolved so far.
  pub fn len(&self) -> usize { self.ids.len() }
}
