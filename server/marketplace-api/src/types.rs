//! Core types for the marketplace (JSON contracts + in-memory models).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingStatus {
  Active,
  SoldOut,
  Draft,
}

impl ListingStatus {
  /// Parse a tab filter; `all` means no filter.
  pub fn parse_filter(s: &str) -> Result<Option<Self>, String> {
    match s {
      "all" | "" => Ok(None),
      "active" => Ok(Some(Self::Active)),
      "sold-out" => Ok(Some(Self::SoldOut)),
      "draft" => Ok(Some(Self::Draft)),
      other => Err(format!("unknown status {:?}", other)),
    }
  }

  /// Status a listing should have after its quantity changes.
  pub fn for_quantity(quantity: u32) -> Self {
    if quantity > 0 {
      Self::Active
    } else {
      Self::SoldOut
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
  pub id: String,
  pub name: String,
  pub description: String,
  pub location: String,
  pub rating: f64,
  pub review_count: u32,
}

/// Card-sized view of a business, shown next to each listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSummary {
  pub id: String,
  pub name: String,
  pub location: String,
  pub rating: f64,
}

impl From<&Business> for BusinessSummary {
  fn from(b: &Business) -> Self {
    Self {
      id: b.id.clone(),
      name: b.name.clone(),
      location: b.location.clone(),
      rating: b.rating,
    }
  }
}

/// A surprise bag (or similar) offered at a discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
  pub id: String,
  pub business_id: String,
  pub name: String,
  pub price: f64,
  pub quantity: u32,
  pub status: ListingStatus,
  pub pickup_time: String,
}

/// Add-listing form; id and status are assigned by the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
  pub name: String,
  pub price: f64,
  pub quantity: u32,
  pub pickup_time: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullListing {
  #[serde(flatten)]
  pub listing: Listing,
  pub business: BusinessSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct BusinessPage {
  pub business: Business,
  pub listings: Vec<Listing>,
}

// ---------------------------------------------------------------------------
// Sales
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
  pub id: String,
  /// None for imported history that predates the catalog.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub listing_id: Option<String>,
  pub business_id: String,
  pub customer: String,
  pub item: String,
  pub amount: f64,
  pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
  pub listing: Listing,
  pub sale_id: String,
  pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
  pub revenue: f64,
  pub sales_count: usize,
  pub active_listings: usize,
  pub recent_sales: Vec<Sale>,
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Account {
  Customer,
  Business {
    #[serde(rename = "businessId")]
    business_id: String,
  },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub name: String,
  pub email: String,
  #[serde(flatten)]
  pub account: Account,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
  pub token: Uuid,
  pub user: User,
  pub created_at: DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
  pub name: String,
  pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSignupRequest {
  pub business_name: String,
  pub contact_name: String,
  pub email: String,
  #[serde(default)]
  pub location: String,
  #[serde(default)]
  pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate {
  pub status: ListingStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingQuery {
  #[serde(default)]
  pub status: Option<String>,
}
