//! Throwaway HTTP servers for exercising the feed client, and a log sink.

use std::{
  io,
  sync::{Arc, Mutex},
};

use axum::{Json, Router, routing::get};
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::{level_filters::LevelFilter, subscriber::DefaultGuard};

/// A router that answers `GET /data.json` with `body`.
pub fn feed_router(body: Value) -> Router {
  Router::new().route(
    "/data.json",
    get(move || {
      let body = body.clone();
      async move { Json(body) }
    }),
  )
}

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn serve(app: Router) -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let address  = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });
  format!("http://{address}")
}

/// A URL on a local port that nothing listens on.
pub async fn unreachable_url() -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let address  = listener.local_addr().unwrap();
  drop(listener);
  format!("http://{address}/data.json")
}

/// Collects everything logged on the current thread while installed.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
  /// Capture every level until the guard is dropped.
  pub fn install(&self) -> DefaultGuard {
    let sink = self.clone();
    let subscriber = tracing_subscriber::fmt()
      .with_max_level(LevelFilter::TRACE)
      .with_writer(move || sink.clone())
      .with_ansi(false)
      .finish();
    tracing::subscriber::set_default(subscriber)
  }

  pub fn contents(&self) -> String {
    String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
  }
}

impl io::Write for LogCapture {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.0.lock().unwrap().extend_from_slice(buf);
    Ok(buf.len())
  }

  fn flush(&mut self) -> io::Result<()> { Ok(()) }
}
