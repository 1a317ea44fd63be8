//! HTTP handlers for the marketplace API.

use axum::{
  extract::{rejection::JsonRejection, Path, Query, State},
  http::{header::AUTHORIZATION, HeaderMap, StatusCode},
  Json,
};
use chrono::Utc;
use impact_engine::{ActionResult, ImpactDisplay, ImpactRequest, VALIDATION_MESSAGE};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dashboard;
use crate::error::ApiError;
use crate::session;
use crate::state::AppState;
use crate::types::*;

type Shared = State<Arc<AppState>>;
type JsonBody<T> = Result<Json<T>, JsonRejection>;

pub async fn health() -> &'static str {
  "ok"
}

// ---------------------------------------------------------------------------
// Impact calculator
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ImpactResponse {
  #[serde(flatten)]
  pub result: ActionResult,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub display: Option<ImpactDisplay>,
}

/// Unreadable or non-numeric bodies get the same envelope as negative values.
pub async fn impact(payload: JsonBody<ImpactRequest>) -> (StatusCode, Json<ImpactResponse>) {
  let request = match payload {
    Ok(Json(request)) => request,
    Err(rejection) => {
      warn!(error = %rejection.body_text(), "impact request body rejected");
      let result = ActionResult::failed(VALIDATION_MESSAGE);
      return (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ImpactResponse { result, display: None }),
      );
    }
  };
  match impact_engine::calculate(&request) {
    Ok(data) => {
      let display = Some(data.display());
      let result = ActionResult::ok(data);
      (StatusCode::OK, Json(ImpactResponse { result, display }))
    }
    Err(e) => {
      let status = if e.is_validation() {
        StatusCode::UNPROCESSABLE_ENTITY
      } else {
        StatusCode::INTERNAL_SERVER_ERROR
      };
      let result = impact_engine::failure(&e);
      (status, Json(ImpactResponse { result, display: None }))
    }
  }
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

fn bearer(headers: &HeaderMap) -> Result<Uuid, ApiError> {
  let raw = headers
    .get(AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;
  let token = raw.strip_prefix("Bearer ").ok_or(ApiError::Unauthorized)?;
  Uuid::parse_str(token.trim()).map_err(|_| ApiError::Unauthorized)
}

async fn current_session(state: &AppState, headers: &HeaderMap) -> Result<Session, ApiError> {
  let token = bearer(headers)?;
  state
    .sessions
    .write()
    .await
    .get(&token, Utc::now())
    .ok_or(ApiError::Unauthorized)
}

pub async fn signup(
  State(state): Shared,
  payload: JsonBody<SignupRequest>,
) -> Result<(StatusCode, Json<Session>), ApiError> {
  let Json(req) = payload?;
  session::validate_identity(&req.name, &req.email)?;
  let user = session::customer(&req.name, &req.email);
  let s = state.sessions.write().await.login(user, Utc::now());
  info!(email = %s.user.email, "customer signed in");
  Ok((StatusCode::CREATED, Json(s)))
}

pub async fn business_signup(
  State(state): Shared,
  payload: JsonBody<BusinessSignupRequest>,
) -> Result<(StatusCode, Json<Session>), ApiError> {
  let Json(req) = payload?;
  if req.business_name.trim().is_empty() {
    return Err(ApiError::validation("businessName", "Business name is required"));
  }
  session::validate_identity(&req.contact_name, &req.email)?;

  let business = state
    .catalog
    .write()
    .await
    .register_business(&req.business_name, &req.location, &req.description);
  let user = User {
    name: req.contact_name.trim().to_string(),
    email: req.email.trim().to_string(),
    account: Account::Business {
      business_id: business.id.clone(),
    },
  };
  let s = state.sessions.write().await.login(user, Utc::now());
  info!(business = %business.id, "business registered");
  Ok((StatusCode::CREATED, Json(s)))
}

pub async fn logout(State(state): Shared, headers: HeaderMap) -> Result<StatusCode, ApiError> {
  let token = bearer(&headers)?;
  if state.sessions.write().await.logout(&token) {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::Unauthorized)
  }
}

pub async fn me(State(state): Shared, headers: HeaderMap) -> Result<Json<User>, ApiError> {
  let s = current_session(&state, &headers).await?;
  Ok(Json(s.user))
}

// ---------------------------------------------------------------------------
// Customer browsing
// ---------------------------------------------------------------------------

pub async fn food(
  State(state): Shared,
  headers: HeaderMap,
) -> Result<Json<Vec<FullListing>>, ApiError> {
  let s = current_session(&state, &headers).await?;
  s.require_customer()?;
  let listings = state.catalog.read().await.active_listings();
  Ok(Json(listings))
}

pub async fn reserve(
  State(state): Shared,
  headers: HeaderMap,
  Path(id): Path<String>,
) -> Result<Json<Reservation>, ApiError> {
  let s = current_session(&state, &headers).await?;
  let user = s.require_customer()?;
  let r = state
    .catalog
    .write()
    .await
    .reserve(&id, &user.name, Utc::now())
    .map_err(|e| {
      warn!(listing = %id, error = %e, "reservation refused");
      e
    })?;
  info!(listing = %id, remaining = r.listing.quantity, "listing reserved");
  Ok(Json(r))
}

pub async fn restaurant(
  State(state): Shared,
  Path(id): Path<String>,
) -> Result<Json<BusinessPage>, ApiError> {
  let page = state.catalog.read().await.business_page(&id)?;
  Ok(Json(page))
}

// ---------------------------------------------------------------------------
// Business dashboard
// ---------------------------------------------------------------------------

pub async fn dashboard(
  State(state): Shared,
  headers: HeaderMap,
) -> Result<Json<DashboardSummary>, ApiError> {
  let s = current_session(&state, &headers).await?;
  let business_id = s.business_id()?;
  let catalog = state.catalog.read().await;
  Ok(Json(dashboard::summarize(&catalog, business_id)?))
}

pub async fn my_listings(
  State(state): Shared,
  headers: HeaderMap,
  Query(query): Query<ListingQuery>,
) -> Result<Json<Vec<Listing>>, ApiError> {
  let s = current_session(&state, &headers).await?;
  let business_id = s.business_id()?;
  let filter = ListingStatus::parse_filter(query.status.as_deref().unwrap_or("all"))
    .map_err(|reason| ApiError::validation("status", &reason))?;
  let listings = state.catalog.read().await.listings(Some(business_id), filter);
  Ok(Json(listings))
}

pub async fn add_listing(
  State(state): Shared,
  headers: HeaderMap,
  payload: JsonBody<NewListing>,
) -> Result<(StatusCode, Json<Listing>), ApiError> {
  let s = current_session(&state, &headers).await?;
  let business_id = s.business_id()?;
  let Json(new) = payload?;
  let l = state.catalog.write().await.add_listing(business_id, new)?;
  info!(listing = %l.id, name = %l.name, "listing added");
  Ok((StatusCode::CREATED, Json(l)))
}

pub async fn set_listing_status(
  State(state): Shared,
  headers: HeaderMap,
  Path(id): Path<String>,
  payload: JsonBody<StatusUpdate>,
) -> Result<Json<Listing>, ApiError> {
  let s = current_session(&state, &headers).await?;
  let business_id = s.business_id()?;
  let Json(update) = payload?;
  let l = state
    .catalog
    .write()
    .await
    .set_status(business_id, &id, update.status)?;
  Ok(Json(l))
}

pub async fn duplicate_listing(
  State(state): Shared,
  headers: HeaderMap,
  Path(id): Path<String>,
) -> Result<(StatusCode, Json<Listing>), ApiError> {
  let s = current_session(&state, &headers).await?;
  let business_id = s.business_id()?;
  let l = state.catalog.write().await.duplicate(business_id, &id)?;
  Ok((StatusCode::CREATED, Json(l)))
}

pub async fn delete_listing(
  State(state): Shared,
  headers: HeaderMap,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  let s = current_session(&state, &headers).await?;
  let business_id = s.business_id()?;
  let l = state.catalog.write().await.delete(business_id, &id)?;
  info!(listing = %l.id, "listing deleted");
  Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bearer_requires_scheme_and_uuid() {
    let mut h = HeaderMap::new();
    assert!(matches!(bearer(&h), Err(ApiError::Unauthorized)));

    h.insert(AUTHORIZATION, "Token abc".parse().unwrap());
    assert!(bearer(&h).is_err());

    h.insert(AUTHORIZATION, "Bearer not-a-uuid".parse().unwrap());
    assert!(bearer(&h).is_err());

    let token = Uuid::new_v4();
    h.insert(AUTHORIZATION, format!("Bearer {}", token).parse().unwrap());
    assert_eq!(bearer(&h).unwrap(), token);
  }

  #[tokio::test]
  async fn impact_validation_failure_is_422() {
    let (status, Json(body)) = impact(Ok(Json(ImpactRequest::new(-5.0, 10.0)))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body.result.error.as_deref(), Some(VALIDATION_MESSAGE));
    assert!(body.display.is_none());
  }

  #[tokio::test]
  async fn impact_success_includes_display() {
    let (status, Json(body)) = impact(Ok(Json(ImpactRequest::new(10.0, 25.0)))).await;
    assert_eq!(status, StatusCode::OK);
    let v = serde_json::to_value(&body).unwrap();
    assert_eq!(v["success"], true);
    assert_eq!(v["data"]["co2EmissionsReducedKg"], 25.0);
    assert_eq!(v["display"]["moneySaved"], "€25.00");
  }

  #[tokio::test]
  async fn impact_overflow_is_500() {
    let (status, Json(body)) = impact(Ok(Json(ImpactRequest::new(f64::MAX, 0.0)))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.result.error.as_deref(), Some(impact_engine::SERVER_ERROR_MESSAGE));
  }
}
