//! Error types for `petro-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("malformed record: expected an object, got {0}")]
  NotAnObject(&'static str),

  /// A required key is missing or holds the wrong JSON type.
  #[error("malformed record: {0}")]
  Json(#[from] serde_json::Error),

  #[error("field `{field}` is not an integer: {value}")]
  NotAnInteger { field: &'static str, value: String },

  #[error("field `{field}` is out of range: {value}")]
  OutOfRange { field: &'static str, value: String },

  #[error("sale amount must not be negative, got {0}")]
  NegativeAmount(i64),

  #[error("invalid query name: {0:?}")]
  UnknownReport(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
