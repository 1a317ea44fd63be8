//! Service configuration from the environment, with sane defaults.

use std::env;
use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;
use tracing::info;

/// One year.
const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid {key} value {value:?}: {reason}")]
  Invalid {
    key: &'static str,
    value: String,
    reason: String,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Compact,
  Json,
}

impl FromStr for LogFormat {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "compact" | "text" => Ok(Self::Compact),
      "json" => Ok(Self::Json),
      other => Err(format!("expected compact|json, got {}", other)),
    }
  }
}

#[derive(Debug, Clone)]
pub struct Config {
  pub bind_addr: IpAddr,
  pub port: u16,
  pub log_format: LogFormat,
  /// Default tracing filter when RUST_LOG is unset.
  pub log_filter: String,
  pub cors_permissive: bool,
  pub session_ttl_hours: i64,
  /// Keys that fell back to their default; logged once tracing is up.
  pub defaulted: Vec<&'static str>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
      port: 5005,
      log_format: LogFormat::Compact,
      log_filter: "marketplace_api=info,impact_engine=info".to_string(),
      cors_permissive: true,
      session_ttl_hours: 24,
      defaulted: Vec::new(),
    }
  }
}

impl Config {
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Build from any key lookup; unset keys keep their defaults.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let defaults = Self::default();
    let mut defaulted = Vec::new();
    let session_ttl_hours = load(
      &lookup,
      "SESSION_TTL_HOURS",
      defaults.session_ttl_hours,
      &mut defaulted,
    )?;
    if !(1..=MAX_SESSION_TTL_HOURS).contains(&session_ttl_hours) {
      return Err(ConfigError::Invalid {
        key: "SESSION_TTL_HOURS",
        value: session_ttl_hours.to_string(),
        reason: format!("expected 1..={}", MAX_SESSION_TTL_HOURS),
      });
    }
    let bind_addr = load(&lookup, "BIND_ADDR", defaults.bind_addr, &mut defaulted)?;
    let port = load(&lookup, "PORT", defaults.port, &mut defaulted)?;
    let log_format = load(&lookup, "LOG_FORMAT", defaults.log_format, &mut defaulted)?;
    let cors_permissive = load(
      &lookup,
      "CORS_PERMISSIVE",
      defaults.cors_permissive,
      &mut defaulted,
    )?;
    let log_filter = lookup("LOG_FILTER").unwrap_or_else(|| {
      defaulted.push("LOG_FILTER");
      defaults.log_filter
    });
    Ok(Self {
      bind_addr,
      port,
      log_format,
      log_filter,
      cors_permissive,
      session_ttl_hours,
      defaulted,
    })
  }

  /// Call after the subscriber is installed; earlier events have nowhere to go.
  pub fn log_defaults(&self) {
    for key in &self.defaulted {
      info!("{key} not set, using default");
    }
  }

  pub fn socket_addr(&self) -> SocketAddr {
    SocketAddr::new(self.bind_addr, self.port)
  }
}

fn load<F, T>(
  lookup: &F,
  key: &'static str,
  default: T,
  defaulted: &mut Vec<&'static str>,
) -> Result<T, ConfigError>
where
  F: Fn(&str) -> Option<String>,
  T: FromStr,
  T::Err: Display,
{
  match lookup(key) {
    Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
      key,
      value: raw.clone(),
      reason: e.to_string(),
    }),
    None => {
      defaulted.push(key);
      Ok(default)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    move |k: &str| map.get(k).cloned()
  }

  #[test]
  fn empty_environment_gives_defaults() {
    let cfg = Config::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.port, 5005);
    assert_eq!(cfg.socket_addr().to_string(), "127.0.0.1:5005");
    assert_eq!(cfg.log_format, LogFormat::Compact);
    assert_eq!(cfg.session_ttl_hours, 24);
    assert!(cfg.defaulted.contains(&"PORT"));
    assert!(cfg.defaulted.contains(&"LOG_FILTER"));
  }

  #[test]
  fn set_keys_are_not_reported_as_defaulted() {
    let cfg = Config::from_lookup(lookup(&[("PORT", "8080")])).unwrap();
    assert!(!cfg.defaulted.contains(&"PORT"));
    assert!(cfg.defaulted.contains(&"BIND_ADDR"));
  }

  #[test]
  fn overrides_are_parsed() {
    let cfg = Config::from_lookup(lookup(&[
      ("PORT", "8080"),
      ("BIND_ADDR", "0.0.0.0"),
      ("LOG_FORMAT", "JSON"),
      ("CORS_PERMISSIVE", "false"),
    ]))
    .unwrap();
    assert_eq!(cfg.socket_addr().to_string(), "0.0.0.0:8080");
    assert_eq!(cfg.log_format, LogFormat::Json);
    assert!(!cfg.cors_permissive);
  }

  #[test]
  fn bad_port_is_an_error_not_a_panic() {
    let err = Config::from_lookup(lookup(&[("PORT", "seventy")])).unwrap_err();
    assert!(err.to_string().contains("PORT"));
  }

  #[test]
  fn session_ttl_must_be_positive() {
    assert!(Config::from_lookup(lookup(&[("SESSION_TTL_HOURS", "0")])).is_err());
    assert!(Config::from_lookup(lookup(&[("SESSION_TTL_HOURS", "48")])).is_ok());
  }
}
