//! Import the petroleum sales feed into SQLite and report on it.
//!
//! [`Importer`] fetches the feed and loads it through any
//! [`SalesStore`](petro_core::store::SalesStore); [`Reporter`] runs one of
//! the fixed reports and [`render`] turns the result into a text table.

pub mod feed;
pub mod importer;
pub mod render;
pub mod reporter;
pub mod settings;

pub use feed::{FeedClient, FeedError};
pub use importer::{ImportError, ImportOutcome, Importer};
pub use render::render;
pub use reporter::{Answer, Reporter};
pub use settings::{Overrides, Settings};

#[cfg(test)]
mod test_support;
