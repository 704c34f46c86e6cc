//! Core types and trait definitions for the petroleum sales report.
//!
//! This crate is free of HTTP and database dependencies. It owns the feed
//! record format, the normalized row types, the [`SalesStore`](store::SalesStore)
//! abstraction, and the pure aggregations behind every report.

pub mod error;
pub mod record;
pub mod report;
pub mod sale;
pub mod store;

pub use error::{Error, Result};
