//! ResQ Marketplace API
//!
//! HTTP service behind the surplus-food front-end: the impact calculator,
//! sessions, customer browsing and reservations, and the business dashboard.
//! All state lives in memory, seeded from the launch catalog.

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod session;
pub mod state;
pub mod types;

use axum::{
  routing::{get, post},
  Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::{Config, ConfigError, LogFormat};
pub use error::ApiError;
pub use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
  let cors = if state.config.cors_permissive {
    CorsLayer::permissive()
  } else {
    CorsLayer::new()
  };

  Router::new()
    .route("/health", get(handlers::health))
    .route("/impact", post(handlers::impact))
    .route("/signup", post(handlers::signup))
    .route("/business-signup", post(handlers::business_signup))
    .route("/logout", post(handlers::logout))
    .route("/me", get(handlers::me))
    .route("/food", get(handlers::food))
    .route("/food/:id/reserve", post(handlers::reserve))
    .route("/restaurants/:id", get(handlers::restaurant))
    .route("/dashboard", get(handlers::dashboard))
    .route(
      "/dashboard/listings",
      get(handlers::my_listings).post(handlers::add_listing),
    )
    .route(
      "/dashboard/listings/:id",
      axum::routing::delete(handlers::delete_listing),
    )
    .route(
      "/dashboard/listings/:id/status",
      post(handlers::set_listing_status),
    )
    .route(
      "/dashboard/listings/:id/duplicate",
      post(handlers::duplicate_listing),
    )
    .layer(cors)
    .with_state(state)
}

/// Install the global tracing subscriber. RUST_LOG wins over the configured filter.
pub fn init_tracing(config: &Config) {
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false);
  match config.log_format {
    LogFormat::Compact => builder.compact().init(),
    LogFormat::Json => builder.json().init(),
  }
}

pub async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
  let addr = config.socket_addr();
  let state = Arc::new(AppState::new(config));
  let app = router(state);

  let listener = TcpListener::bind(addr).await?;
  info!("marketplace-api listening on http://{}", addr);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  info!("marketplace-api shut down");
  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to install Ctrl+C handler");
      std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut s) => {
        s.recv().await;
        info!("received terminate signal, shutting down");
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to install SIGTERM handler");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }
}
