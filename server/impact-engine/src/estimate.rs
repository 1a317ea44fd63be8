//! CO2e estimate from rescued food mass.

use crate::error::ImpactError;
use crate::types::{ImpactRequest, ImpactResult};

/// kg CO2e avoided per kg of food kept out of the waste stream.
pub const CO2E_KG_PER_FOOD_KG: f64 = 2.5;

/// Echo both inputs and derive `co2 = food * 2.5`. No I/O, no state.
pub fn estimate_impact(request: &ImpactRequest) -> ImpactResult {
  ImpactResult {
    food_saved_kg: request.food_saved_kg,
    money_saved: request.money_saved,
    co2_emissions_reduced_kg: request.food_saved_kg * CO2E_KG_PER_FOOD_KG,
  }
}

/// Like [`estimate_impact`], but fails when the product is not representable
/// (a finite input near `f64::MAX` overflows to infinity).
pub fn try_estimate_impact(request: &ImpactRequest) -> Result<ImpactResult, ImpactError> {
  let result = estimate_impact(request);
  if !result.co2_emissions_reduced_kg.is_finite() {
    return Err(ImpactError::computation(format!(
      "co2 estimate overflowed for foodSavedKg={}",
      request.food_saved_kg
    )));
  }
  Ok(result)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ten_kg_is_twenty_five_kg_co2e() {
    let out = estimate_impact(&ImpactRequest::new(10.0, 25.0));
    assert_eq!(out.food_saved_kg, 10.0);
    assert_eq!(out.money_saved, 25.0);
    assert_eq!(out.co2_emissions_reduced_kg, 25.0);
  }

  #[test]
  fn zero_in_zero_out() {
    let out = estimate_impact(&ImpactRequest::new(0.0, 0.0));
    assert_eq!(out.co2_emissions_reduced_kg, 0.0);
    assert_eq!(out.money_saved, 0.0);
  }

  #[test]
  fn factor_holds_across_a_range_of_masses() {
    for food in [0.001, 0.4, 1.0, 3.3, 17.25, 1_000.0, 123_456.789] {
      let out = estimate_impact(&ImpactRequest::new(food, 1.0));
      assert_eq!(out.co2_emissions_reduced_kg, food * 2.5);
      assert_eq!(out.food_saved_kg, food);
    }
  }

  #[test]
  fn identical_input_gives_bit_identical_output() {
    let req = ImpactRequest::new(0.1 + 0.2, 7.77);
    let a = estimate_impact(&req);
    let b = estimate_impact(&req);
    assert_eq!(
      a.co2_emissions_reduced_kg.to_bits(),
      b.co2_emissions_reduced_kg.to_bits()
    );
    assert_eq!(a, b);
  }

  #[test]
  fn overflow_is_a_computation_error() {
    let err = try_estimate_impact(&ImpactRequest::new(f64::MAX, 0.0)).unwrap_err();
    assert!(matches!(err, ImpactError::Computation(_)));
  }
}
