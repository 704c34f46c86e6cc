//! Feed records and their validation.
//!
//! The feed is a JSON array of flat objects:
//!
//! ```json
//! { "country": "Nepal", "petroleum_product": "Diesel", "year": "2014", "sale": 1024 }
//! ```
//!
//! `year` and `sale` arrive either as JSON integers or as strings holding an
//! integer. Each element is validated on its own, so one bad element never
//! prevents the others from being imported.

use std::num::{IntErrorKind, ParseIntError};

use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result, sale::Amount};

// ─── Wire format ─────────────────────────────────────────────────────────────

/// One element of the feed array, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedRecord {
  pub country:           String,
  pub petroleum_product: String,
  pub year:              Integral,
  pub sale:              Integral,
}

/// A JSON value that should hold an integer.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Integral {
  Number(i64),
  Text(String),
  /// Anything else (integers above `i64::MAX`, floats, booleans, null,
  /// nested values). Kept so the error message can show what was actually
  /// received.
  Other(Value),
}

impl Integral {
  fn to_i64(&self, field: &'static str) -> Result<i64> {
    match self {
      Self::Number(n) => Ok(*n),
      Self::Text(s) => s.trim().parse().map_err(|e: ParseIntError| {
        match e.kind() {
          IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Error::OutOfRange {
            field,
            value: s.trim().to_owned(),
          },
          _ => Error::NotAnInteger { field, value: format!("{s:?}") },
        }
      }),
      Self::Other(v) if v.is_u64() => Err(Error::OutOfRange {
        field,
        value: v.to_string(),
      }),
      Self::Other(v) => Err(Error::NotAnInteger {
        field,
        value: v.to_string(),
      }),
    }
  }
}

/// JSON type name of `value`, for error messages.
fn kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

// ─── Validated record ────────────────────────────────────────────────────────

/// A feed record that passed validation and is ready to be imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRecord {
  pub country: String,
  pub product: String,
  pub year:    i32,
  pub amount:  Amount,
}

impl SaleRecord {
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

  /// Validate a single element of the feed array.
  ///
  /// Only objects are accepted. Serde would otherwise read an array as a
  /// struct by position.
  pub fn from_value(value: Value) -> Result<Self> {
    let map = match value {
      Value::Object(map) => map,
      other => return Err(Error::NotAnObject(kind(&other))),
    };
    let raw: FeedRecord = serde_json::from_value(Value::Object(map))?;
    Self::try_from(raw)
  }
}

impl TryFrom<FeedRecord> for SaleRecord {
  type Error = Error;

  fn try_from(raw: FeedRecord) -> Result<Self> {
    let year = raw.year.to_i64("year")?;
    let year = i32::try_from(year)
      .map_err(|_| Error::OutOfRange { field: "year", value: year.to_string() })?;

    let amount = raw.sale.to_i64("sale")?;
    if amount < 0 {
      return Err(Error::NegativeAmount(amount));
    }

    Ok(Self {
      country: raw.country,
      product: raw.petroleum_product,
      year,
      amount,
    })
  }
}
