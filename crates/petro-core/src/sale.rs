//! Row types of the normalized sales schema.
//!
//! Three dimension tables (countries, products, years) hold each distinct
//! value exactly once under a surrogate key. The `sales` fact table holds one
//! row per observed sale and references one row of each dimension.

/// Surrogate key generated by the store.
pub type RowId = i64;

/// A whole number of units sold. Never negative.
pub type Amount = i64;

// ─── Dimensions ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
  pub id:   RowId,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
  pub id:   RowId,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Year {
  pub id:    RowId,
  pub value: i32,
}

// ─── Facts ───────────────────────────────────────────────────────────────────

/// A fact row exactly as stored: foreign keys only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
  pub id:         RowId,
  pub country_id: RowId,
  pub product_id: RowId,
  pub year_id:    RowId,
  pub amount:     Amount,
}

/// A fact row joined with its three dimensions.
///
/// This is the input of every report aggregation, so reports can be computed
/// from any source of facts, not just a database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleFact {
  pub country: String,
  pub product: String,
  pub year:    i32,
  pub amount:  Amount,
}

impl SaleFact {
  pub fn new(
    country: impl Into<String>,
    product: impl Into<String>,
    year: i32,
    amount: Amount,
  ) -> Self {
    Self {
      country: country.into(),
      product: product.into(),
      year,
      amount,
    }
  }
}
