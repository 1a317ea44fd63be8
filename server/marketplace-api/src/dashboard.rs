//! Business dashboard: revenue, sales count, and the most recent sales.

use crate::catalog::Catalog;
use crate::error::ApiError;
use crate::types::{DashboardSummary, ListingStatus};

pub const RECENT_SALES: usize = 5;

pub fn summarize(catalog: &Catalog, business_id: &str) -> Result<DashboardSummary, ApiError> {
  catalog.business(business_id)?;

  let mut sales: Vec<_> = catalog.sales_for(business_id).cloned().collect();
  let revenue = round_cents(sales.iter().map(|s| s.amount).sum());
  let sales_count = sales.len();

  // Newest first; ties keep the later-recorded sale first.
  sales.reverse();
  sales.sort_by(|a, b| b.at.cmp(&a.at));
  sales.truncate(RECENT_SALES);

  Ok(DashboardSummary {
    revenue,
    sales_count,
    active_listings: catalog
      .listings(Some(business_id), Some(ListingStatus::Active))
      .len(),
    recent_sales: sales,
  })
}

fn round_cents(v: f64) -> f64 {
  (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{DateTime, Duration, TimeZone, Utc};

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 17, 0, 0).unwrap()
  }

  #[test]
  fn seeded_bakery_dashboard() {
    let c = Catalog::seeded(now());
    let d = summarize(&c, "b1").unwrap();
    assert_eq!(d.sales_count, 5);
    assert_eq!(d.revenue, 31.47);
    assert_eq!(d.active_listings, 2);
    assert_eq!(d.recent_sales[0].customer, "Olivia Martin");
    assert_eq!(d.recent_sales[4].customer, "Sofia Davis");
  }

  #[test]
  fn new_reservation_is_most_recent() {
    let mut c = Catalog::seeded(now());
    c.reserve("1", "Ada", now() + Duration::minutes(1)).unwrap();
    let d = summarize(&c, "b1").unwrap();
    assert_eq!(d.sales_count, 6);
    assert_eq!(d.recent_sales.len(), RECENT_SALES);
    assert_eq!(d.recent_sales[0].customer, "Ada");
    assert_eq!(d.revenue, 36.46);
  }

  #[test]
  fn unknown_business_is_not_found() {
    let c = Catalog::seeded(now());
    assert!(matches!(summarize(&c, "b9"), Err(ApiError::NotFound(_))));
  }

  #[test]
  fn business_without_sales() {
    let c = Catalog::seeded(now());
    let d = summarize(&c, "b2").unwrap();
    assert_eq!(d.sales_count, 0);
    assert_eq!(d.revenue, 0.0);
    assert!(d.recent_sales.is_empty());
  }
}
