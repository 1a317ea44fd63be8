//! Structured error types for the impact engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImpactError {
  #[error("validation: {field}: {reason}")]
  Validation { field: String, reason: String },

  #[error("computation: {0}")]
  Computation(String),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("io: {0}")]
  Io(#[from] std::io::Error),
}

impl ImpactError {
  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn computation(msg: impl Into<String>) -> Self {
    Self::Computation(msg.into())
  }

  pub fn is_validation(&self) -> bool {
    matches!(self, Self::Validation { .. })
  }
}
