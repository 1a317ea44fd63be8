//! API errors and their HTTP mapping.

use axum::{
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

pub const MALFORMED_BODY: &str = "malformed request body";

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("validation: {field}: {reason}")]
  Validation { field: String, reason: String },

  #[error("missing or expired session")]
  Unauthorized,

  #[error("{0}")]
  Forbidden(&'static str),

  #[error("{0} not found")]
  NotFound(String),

  #[error("{0}")]
  Conflict(String),
}

impl ApiError {
  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn not_found(what: impl Into<String>) -> Self {
    Self::NotFound(what.into())
  }

  pub fn conflict(msg: impl Into<String>) -> Self {
    Self::Conflict(msg.into())
  }

  pub fn status(&self) -> StatusCode {
    match self {
      Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
      Self::Unauthorized => StatusCode::UNAUTHORIZED,
      Self::Forbidden(_) => StatusCode::FORBIDDEN,
      Self::NotFound(_) => StatusCode::NOT_FOUND,
      Self::Conflict(_) => StatusCode::CONFLICT,
    }
  }
}

/// JSON body for every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl From<&ApiError> for ErrorOutput {
  fn from(e: &ApiError) -> Self {
    match e {
      ApiError::Validation { field, reason } => Self {
        error: true,
        message: reason.clone(),
        field: Some(field.clone()),
      },
      other => Self {
        error: true,
        message: other.to_string(),
        field: None,
      },
    }
  }
}

/// Body could not be read as the expected JSON. Serde detail goes to the log only.
impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    warn!(status = %rejection.status(), error = %rejection.body_text(), "request body rejected");
    Self::validation("body", MALFORMED_BODY)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status(), Json(ErrorOutput::from(&self))).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validation_maps_to_422_with_field() {
    let e = ApiError::validation("price", "must not be negative");
    assert_eq!(e.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = ErrorOutput::from(&e);
    assert_eq!(body.field.as_deref(), Some("price"));
    assert_eq!(body.message, "must not be negative");
  }

  #[test]
  fn not_found_message_names_the_thing() {
    let e = ApiError::not_found("listing 42");
    assert_eq!(e.status(), StatusCode::NOT_FOUND);
    assert_eq!(ErrorOutput::from(&e).message, "listing 42 not found");
  }
}
