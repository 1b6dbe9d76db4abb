//! Static host for the built portfolio
//! site.
//!
//! Serves files from a root directory,
//! answers `/health` with request
//! analytics, and can instead be
//! configured to answer every request with
//! a fixed return directive (typically an
//! HTTP to HTTPS redirect).

pub mod analytics;
pub mod cli;
pub mod config;
pub mod guard;
pub mod handlers;

use std::io::IsTerminal;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{
  Context,
  anyhow
};
use axum::Router;
use axum::body::HttpBody;
use axum::extract::{
  ConnectInfo,
  Request
};
use axum::http::header;
use axum::middleware::{
  self,
  Next
};
use axum::response::Response;
use axum::routing::get;
use tower_http::trace::TraceLayer;
use tracing::{
  debug,
  info
};
use tracing_subscriber::EnvFilter;

use crate::analytics::Analytics;
use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
  pub config:    Arc<ServerConfig>,
  pub analytics: Arc<Analytics>
}

impl AppState {
  pub fn new(config: ServerConfig) -> Self {
    Self {
      config:    Arc::new(config),
      analytics: Arc::new(Analytics::new())
    }
  }
}

pub fn create_router(
  state: AppState
) -> Router {
  let router = if state
    .config
    .return_directive
    .is_some()
  {
    // Return directives skip validation;
    // the destination validates.
    Router::new()
      .fallback(handlers::return_directive)
      .with_state(state)
  } else {
    Router::new()
      .route("/health", get(handlers::health))
      .fallback(handlers::serve_file)
      .layer(middleware::from_fn_with_state(
        state.clone(),
        guard::verify_request
      ))
      .with_state(state)
  };

  router
    .layer(middleware::from_fn(log_response))
    .layer(TraceLayer::new_for_http())
}

/// One line per response, in a fixed
/// shape that log tooling can parse.
async fn log_response(
  req: Request,
  next: Next
) -> Response {
  let client = req
    .extensions()
    .get::<ConnectInfo<SocketAddr>>()
    .map(|ConnectInfo(addr)| {
      addr.ip().to_string()
    })
    .unwrap_or_else(|| "-".to_string());
  let summary = format!(
    "{} {}",
    req.method(),
    req.uri()
  );
  let received = req
    .headers()
    .get(header::CONTENT_LENGTH)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.parse::<u64>().ok())
    .unwrap_or(0);

  let response = next.run(req).await;

  let sent = response
    .body()
    .size_hint()
    .exact()
    .unwrap_or(0);
  info!(
    client = %client,
    status = response.status().as_u16(),
    request = %summary,
    received,
    sent,
    "response"
  );
  response
}

pub fn init_tracing(
  verbose: u8,
  quiet: u8
) -> anyhow::Result<()> {
  let default_level = if quiet >= 2 {
    "error"
  } else if quiet == 1 {
    "warn"
  } else if verbose >= 2 {
    "trace"
  } else if verbose == 1 {
    "debug"
  } else {
    "info"
  };

  let env_filter =
    EnvFilter::try_from_default_env()
      .or_else(|_| {
        EnvFilter::try_new(default_level)
      })
      .map_err(|e| {
        anyhow!(
          "invalid RUST_LOG / log filter: \
           {e}"
        )
      })?;

  let init_result =
    tracing_subscriber::fmt()
      .with_env_filter(env_filter)
      .with_target(true)
      .with_level(true)
      .with_ansi(
        std::io::stderr().is_terminal()
      )
      .try_init();

  if let Err(err) = init_result {
    debug!(
      error = %err,
      "tracing subscriber already set, \
       continuing"
    );
  }

  Ok(())
}

async fn shutdown_signal() {
  if let Err(err) =
    tokio::signal::ctrl_c().await
  {
    tracing::error!(
      error = %err,
      "failed listening for ctrl-c"
    );
    std::future::pending::<()>().await;
  }
  info!("shutdown requested");
}

#[tracing::instrument(skip_all)]
pub async fn serve(
  config: ServerConfig
) -> anyhow::Result<()> {
  let addr = config.listen_addr();
  let state = AppState::new(config);
  let app = create_router(state);

  let listener =
    tokio::net::TcpListener::bind(&addr)
      .await
      .with_context(|| {
        format!("failed to bind {addr}")
      })?;
  info!(addr = %addr, "listening");

  axum::serve(
    listener,
    app.into_make_service_with_connect_info::<
      SocketAddr,
    >()
  )
  .with_graceful_shutdown(shutdown_signal())
  .await
  .context("server error")?;

  info!("server shut down");
  Ok(())
}
