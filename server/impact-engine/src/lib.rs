//! ResQ Impact Engine — CO2e estimate for rescued food; no DB, no network.
//! Used by the binary for stdin/stdout; called in-process by marketplace-api.

mod action;
mod display;
mod error;
mod estimate;
mod types;
mod validate;

pub use action::{calculate, failure, get_impact, SERVER_ERROR_MESSAGE, VALIDATION_MESSAGE};
pub use display::ImpactDisplay;
pub use error::ImpactError;
pub use estimate::{estimate_impact, try_estimate_impact, CO2E_KG_PER_FOOD_KG};
pub use types::{ActionResult, ImpactRequest, ImpactResult};
pub use validate::validate;
