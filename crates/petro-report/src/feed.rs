//! HTTP client for the petroleum sales feed.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// The public feed the report was built around.
pub const DEFAULT_FEED_URL: &str = "https://raw.githubusercontent.com/younginnovations/internship-challenges/master/programming/petroleum-report/data.json";

/// A failure that makes the whole feed unusable.
#[derive(Debug, Error)]
pub enum FeedError {
  #[error("failed to fetch feed: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("feed responded with {0}")]
  Status(StatusCode),

  #[error("feed is not a JSON array: {0}")]
  Parse(#[from] serde_json::Error),
}

/// Fetches the feed as a list of raw JSON elements.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct FeedClient {
  client: Client,
  url:    String,
}

impl FeedClient {
  pub fn new(url: impl Into<String>) -> Result<Self, FeedError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, url: url.into() })
  }

  pub fn url(&self) -> &str { &self.url }

  /// `GET` the feed and split it into its array elements.
  ///
  /// Elements are returned unvalidated; only the top level must be an array.
  pub async fn fetch(&self) -> Result<Vec<Value>, FeedError> {
    let resp = self.client.get(&self.url).send().await?;

    if !resp.status().is_success() {
      return Err(FeedError::Status(resp.status()));
    }

    let body = resp.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
  }
}
