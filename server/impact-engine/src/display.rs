//! Human-readable rendering of an impact result for the results panel.

use serde::Serialize;

use crate::types::ImpactResult;

/// Pre-formatted strings; currency at 2 decimals, masses with trailing zeros trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactDisplay {
  pub co2_reduced: String,
  pub food_saved: String,
  pub money_saved: String,
  pub caption: String,
}

impl ImpactResult {
  pub fn display(&self) -> ImpactDisplay {
    let food = mass(self.food_saved_kg);
    ImpactDisplay {
      co2_reduced: mass(self.co2_emissions_reduced_kg),
      caption: format!("Based on saving {}kg of food.", food),
      food_saved: food,
      money_saved: currency(self.money_saved),
    }
  }
}

/// At most 2 decimals, no trailing zeros: 25.0 -> "25", 2.50 -> "2.5".
pub fn mass(v: f64) -> String {
  let s = format!("{:.2}", unsign_zero(v));
  match s.split_once('.') {
    Some((whole, frac)) => match frac.trim_end_matches('0') {
      "" => whole.to_string(),
      frac => format!("{}.{}", whole, frac),
    },
    None => s,
  }
}

pub fn currency(v: f64) -> String {
  format!("€{:.2}", unsign_zero(v))
}

// -0.0 would otherwise render as "-0".
fn unsign_zero(v: f64) -> f64 {
  if v == 0.0 {
    0.0
  } else {
    v
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mass_trims_trailing_zeros() {
    assert_eq!(mass(25.0), "25");
    assert_eq!(mass(2.5), "2.5");
    assert_eq!(mass(0.126), "0.13");
    assert_eq!(mass(0.0), "0");
    assert_eq!(mass(-0.0), "0");
    assert_eq!(mass(100.0), "100");
  }

  #[test]
  fn currency_keeps_two_decimals() {
    assert_eq!(currency(25.0), "€25.00");
    assert_eq!(currency(4.999), "€5.00");
    assert_eq!(currency(7.5), "€7.50");
  }

  #[test]
  fn display_of_default_form_values() {
    let r = ImpactResult {
      food_saved_kg: 10.0,
      money_saved: 25.0,
      co2_emissions_reduced_kg: 25.0,
    };
    let d = r.display();
    assert_eq!(d.co2_reduced, "25");
    assert_eq!(d.money_saved, "€25.00");
    assert_eq!(d.caption, "Based on saving 10kg of food.");
  }
}
