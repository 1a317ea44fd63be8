//! In-memory catalog: businesses, their listings, and the sales ledger.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::ApiError;
use crate::types::*;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
  businesses: Vec<Business>,
  listings: Vec<Listing>,
  sales: Vec<Sale>,
}

impl Catalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// The launch catalog: three partner businesses and their bags.
  pub fn seeded(now: DateTime<Utc>) -> Self {
    let mut c = Self::new();
    c.businesses = vec![
      business(
        "b1",
        "The Corner Bakery",
        "A cozy local bakery specializing in artisanal bread and pastries. We aim to reduce food waste by offering our delicious leftovers at the end of the day.",
        "123 Main St, Amsterdam",
        4.8,
        256,
      ),
      business(
        "b2",
        "Organic Oasis",
        "Organic grocer with daily surplus produce boxes.",
        "Utrecht",
        4.9,
        131,
      ),
      business(
        "b3",
        "Mama's Kitchen",
        "Home-style cooking, end-of-day meals.",
        "Rotterdam",
        4.7,
        88,
      ),
    ];
    c.listings = vec![
      listing("1", "b1", "Surprise Bag - Pastries", 4.99, 5, "4:00 PM - 6:00 PM"),
      listing("1a", "b1", "Surprise Bag - Bread", 3.5, 8, "4:00 PM - 6:00 PM"),
      listing("2", "b2", "Surprise Bag - Groceries", 7.5, 2, "5:00 PM - 7:00 PM"),
      listing("3", "b3", "Surprise Bag - Meal", 9.0, 0, "6:00 PM - 8:00 PM"),
      Listing {
        status: ListingStatus::Draft,
        ..listing("4", "b1", "Day-old Bread Loaf", 2.0, 10, "10:00 AM - 12:00 PM")
      },
      listing("5", "b2", "Fruit & Veggie Box", 6.0, 1, "3:00 PM - 5:00 PM"),
      listing("6", "b3", "Dinner for Two", 12.5, 3, "7:00 PM - 8:00 PM"),
    ];
    let history = [
      ("Olivia Martin", "Surprise Bag - Pastries", 4.99),
      ("Jackson Lee", "Surprise Bag - Groceries", 7.5),
      ("Isabella Nguyen", "Surprise Bag - Pastries", 4.99),
      ("William Kim", "Surprise Bag - Meal", 9.0),
      ("Sofia Davis", "Surprise Bag - Pastries", 4.99),
    ];
    // Oldest first so the ledger stays append-ordered.
    for (i, (customer, item, amount)) in history.iter().enumerate().rev() {
      c.sales.push(Sale {
        id: (i + 1).to_string(),
        listing_id: None,
        business_id: "b1".into(),
        customer: customer.to_string(),
        item: item.to_string(),
        amount: *amount,
        at: now - Duration::minutes(i as i64 + 1),
      });
    }
    c
  }

  pub fn business(&self, id: &str) -> Result<&Business, ApiError> {
    self
      .businesses
      .iter()
      .find(|b| b.id == id)
      .ok_or_else(|| ApiError::not_found(format!("business {}", id)))
  }

  pub fn register_business(&mut self, name: &str, location: &str, description: &str) -> Business {
    let b = Business {
      id: Uuid::new_v4().to_string(),
      name: name.trim().to_string(),
      description: description.trim().to_string(),
      location: location.trim().to_string(),
      rating: 0.0,
      review_count: 0,
    };
    self.businesses.push(b.clone());
    b
  }

  /// Listings in catalog order, optionally narrowed to one business and/or status.
  pub fn listings(&self, business_id: Option<&str>, status: Option<ListingStatus>) -> Vec<Listing> {
    self
      .listings
      .iter()
      .filter(|l| business_id.map_or(true, |b| l.business_id == b))
      .filter(|l| status.map_or(true, |s| l.status == s))
      .cloned()
      .collect()
  }

  /// What customers browse: active listings with their business card.
  pub fn active_listings(&self) -> Vec<FullListing> {
    self
      .listings
      .iter()
      .filter(|l| l.status == ListingStatus::Active)
      .filter_map(|l| {
        let b = self.business(&l.business_id).ok()?;
        Some(FullListing {
          listing: l.clone(),
          business: BusinessSummary::from(b),
        })
      })
      .collect()
  }

  pub fn business_page(&self, id: &str) -> Result<BusinessPage, ApiError> {
    let business = self.business(id)?.clone();
    Ok(BusinessPage {
      listings: self.listings(Some(id), Some(ListingStatus::Active)),
      business,
    })
  }

  pub fn add_listing(&mut self, business_id: &str, new: NewListing) -> Result<Listing, ApiError> {
    self.business(business_id)?;
    validate_new_listing(&new)?;
    let l = Listing {
      id: Uuid::new_v4().to_string(),
      business_id: business_id.to_string(),
      name: new.name.trim().to_string(),
      price: new.price,
      quantity: new.quantity,
      status: ListingStatus::for_quantity(new.quantity),
      pickup_time: new.pickup_time.trim().to_string(),
    };
    self.listings.push(l.clone());
    Ok(l)
  }

  /// Pause (draft) or resume. Active needs stock; sold-out needs none.
  pub fn set_status(
    &mut self,
    business_id: &str,
    id: &str,
    status: ListingStatus,
  ) -> Result<Listing, ApiError> {
    let l = self.owned_mut(business_id, id)?;
    match status {
      ListingStatus::Active if l.quantity == 0 => {
        return Err(ApiError::conflict("cannot activate a listing with no stock"));
      }
      ListingStatus::SoldOut if l.quantity > 0 => {
        return Err(ApiError::conflict("listing still has stock"));
      }
      _ => {}
    }
    l.status = status;
    Ok(l.clone())
  }

  pub fn duplicate(&mut self, business_id: &str, id: &str) -> Result<Listing, ApiError> {
    let src = self.owned_mut(business_id, id)?;
    let copy = Listing {
      id: Uuid::new_v4().to_string(),
      name: format!("{} (copy)", src.name),
      status: ListingStatus::Draft,
      ..src.clone()
    };
    self.listings.push(copy.clone());
    Ok(copy)
  }

  pub fn delete(&mut self, business_id: &str, id: &str) -> Result<Listing, ApiError> {
    let idx = self
      .listings
      .iter()
      .position(|l| l.id == id && l.business_id == business_id)
      .ok_or_else(|| ApiError::not_found(format!("listing {}", id)))?;
    Ok(self.listings.remove(idx))
  }

  /// Take one unit of an active listing and record the sale.
  pub fn reserve(
    &mut self,
    id: &str,
    customer: &str,
    now: DateTime<Utc>,
  ) -> Result<Reservation, ApiError> {
    let l = self
      .listings
      .iter_mut()
      .find(|l| l.id == id)
      .ok_or_else(|| ApiError::not_found(format!("listing {}", id)))?;
    if l.status != ListingStatus::Active || l.quantity == 0 {
      return Err(ApiError::conflict(format!("\"{}\" is no longer available", l.name)));
    }
    l.quantity -= 1;
    l.status = ListingStatus::for_quantity(l.quantity);
    let listing = l.clone();

    let business_name = self
      .business(&listing.business_id)
      .map(|b| b.name.clone())
      .unwrap_or_else(|_| listing.business_id.clone());

    let sale = Sale {
      id: Uuid::new_v4().to_string(),
      listing_id: Some(listing.id.clone()),
      business_id: listing.business_id.clone(),
      customer: customer.to_string(),
      item: listing.name.clone(),
      amount: listing.price,
      at: now,
    };
    let sale_id = sale.id.clone();
    self.sales.push(sale);

    Ok(Reservation {
      message: format!(
        "You've reserved \"{}\". Pick it up from {} between {}.",
        listing.name, business_name, listing.pickup_time
      ),
      listing,
      sale_id,
    })
  }

  pub fn sales_for(&self, business_id: &str) -> impl Iterator<Item = &Sale> {
    let business_id = business_id.to_string();
    self.sales.iter().filter(move |s| s.business_id == business_id)
  }

  fn owned_mut(&mut self, business_id: &str, id: &str) -> Result<&mut Listing, ApiError> {
    self
      .listings
      .iter_mut()
      .find(|l| l.id == id && l.business_id == business_id)
      .ok_or_else(|| ApiError::not_found(format!("listing {}", id)))
  }
}

fn validate_new_listing(new: &NewListing) -> Result<(), ApiError> {
  if new.name.trim().is_empty() {
    return Err(ApiError::validation("name", "Listing name is required"));
  }
  if !new.price.is_finite() || new.price < 0.0 {
    return Err(ApiError::validation("price", "Price must be a positive number"));
  }
  if new.pickup_time.trim().is_empty() {
    return Err(ApiError::validation("pickupTime", "Pickup time is required"));
  }
  Ok(())
}

fn business(
  id: &str,
  name: &str,
  description: &str,
  location: &str,
  rating: f64,
  review_count: u32,
) -> Business {
  Business {
    id: id.into(),
    name: name.into(),
    description: description.into(),
    location: location.into(),
    rating,
    review_count,
  }
}

fn listing(id: &str, business_id: &str, name: &str, price: f64, quantity: u32, pickup: &str) -> Listing {
  Listing {
    id: id.into(),
    business_id: business_id.into(),
    name: name.into(),
    price,
    quantity,
    status: ListingStatus::for_quantity(quantity),
    pickup_time: pickup.into(),
  }
}
