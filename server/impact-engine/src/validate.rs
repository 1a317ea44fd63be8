//! Boundary validation: reject input before it reaches the estimator.

use crate::error::ImpactError;
use crate::types::ImpactRequest;

pub const NOT_POSITIVE: &str = "values must be positive";
pub const NOT_FINITE: &str = "must be a finite number";

/// Both figures must be finite and >= 0. `foodSavedKg` is checked first.
pub fn validate(request: &ImpactRequest) -> Result<(), ImpactError> {
  check("foodSavedKg", request.food_saved_kg)?;
  check("moneySaved", request.money_saved)
}

fn check(field: &str, value: f64) -> Result<(), ImpactError> {
  if !value.is_finite() {
    return Err(ImpactError::validation(field, NOT_FINITE));
  }
  if value < 0.0 {
    return Err(ImpactError::validation(field, NOT_POSITIVE));
  }
  Ok(())
}
