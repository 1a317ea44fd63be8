//! Shared application state.

use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::session::SessionStore;

pub struct AppState {
  pub config: Config,
  pub catalog: RwLock<Catalog>,
  pub sessions: RwLock<SessionStore>,
}

impl AppState {
  /// Fresh state with the seeded catalog and no sessions.
  pub fn new(config: Config) -> Self {
    Self::with_catalog(config, Catalog::seeded(Utc::now()))
  }

  pub fn with_catalog(config: Config, catalog: Catalog) -> Self {
    let ttl = Duration::hours(config.session_ttl_hours);
    Self {
      config,
      catalog: RwLock::new(catalog),
      sessions: RwLock::new(SessionStore::new(ttl)),
    }
  }
}
