//! Input/output types for the impact engine (JSON contract with the front-end).

use serde::{Deserialize, Serialize};

/// Input: the two savings figures entered in the impact form.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactRequest {
  pub food_saved_kg: f64,
  /// Currency-agnostic; the form labels it in euros.
  pub money_saved: f64,
}

impl ImpactRequest {
  pub fn new(food_saved_kg: f64, money_saved: f64) -> Self {
    Self {
      food_saved_kg,
      money_saved,
    }
  }
}

/// Output: the request figures echoed back plus the derived CO2e estimate.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactResult {
  pub food_saved_kg: f64,
  pub money_saved: f64,
  pub co2_emissions_reduced_kg: f64,
}

/// Boundary envelope: what the form submission handler gets back.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ActionResult {
  pub success: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub data: Option<ImpactResult>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl ActionResult {
  pub fn ok(data: ImpactResult) -> Self {
    Self {
      success: true,
      data: Some(data),
      error: None,
    }
  }

  pub fn failed(message: impl Into<String>) -> Self {
    Self {
      success: false,
      data: None,
      error: Some(message.into()),
    }
  }
}
