//! Request-handling boundary: validate, estimate, wrap into an ActionResult.

use tracing::{error, warn};

use crate::error::ImpactError;
use crate::estimate;
use crate::types::{ActionResult, ImpactRequest, ImpactResult};
use crate::validate;

/// Shown when either figure is negative or not a number.
pub const VALIDATION_MESSAGE: &str = "Please enter positive values.";
/// Shown for any internal failure; details only go to the log.
pub const SERVER_ERROR_MESSAGE: &str = "Failed to calculate impact due to a server error.";

/// Validate then estimate. The estimator is never reached on a validation error.
pub fn calculate(request: &ImpactRequest) -> Result<ImpactResult, ImpactError> {
  validate::validate(request)?;
  estimate::try_estimate_impact(request)
}

/// Boundary entrypoint used by both the HTTP handler and the binary.
pub fn get_impact(request: &ImpactRequest) -> ActionResult {
  match calculate(request) {
    Ok(data) => ActionResult::ok(data),
    Err(e) => failure(&e),
  }
}

/// Map an error onto the user-facing envelope, logging it on the way.
pub fn failure(e: &ImpactError) -> ActionResult {
  if e.is_validation() {
    warn!(error = %e, "impact request rejected");
    ActionResult::failed(VALIDATION_MESSAGE)
  } else {
    error!(error = %e, "error in get_impact");
    ActionResult::failed(SERVER_ERROR_MESSAGE)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn valid_request_succeeds() {
    let out = get_impact(&ImpactRequest::new(10.0, 25.0));
    assert!(out.success);
    let data = out.data.unwrap();
    assert_eq!(data.co2_emissions_reduced_kg, 25.0);
    assert!(out.error.is_none());
  }

  #[test]
  fn negative_request_gets_validation_message() {
    let out = get_impact(&ImpactRequest::new(-5.0, 10.0));
    assert!(!out.success);
    assert!(out.data.is_none());
    assert_eq!(out.error.as_deref(), Some(VALIDATION_MESSAGE));
  }

  #[test]
  fn overflow_gets_generic_message() {
    let out = get_impact(&ImpactRequest::new(f64::MAX, 1.0));
    assert!(!out.success);
    assert_eq!(out.error.as_deref(), Some(SERVER_ERROR_MESSAGE));
  }

  #[test]
  fn calculate_short_circuits_on_validation() {
    // f64::MAX would overflow in the estimator; the negative money must win.
    let err = calculate(&ImpactRequest::new(f64::MAX, -1.0)).unwrap_err();
    assert!(err.is_validation());
  }
}
