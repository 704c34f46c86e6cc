//! SQLite backend for the petroleum sales store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on the connection's
//! own thread without blocking the async runtime. A whole import runs inside
//! one call on that thread, as one transaction.

mod dimension;
mod import;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
