//! Explicit sessions keyed by bearer token. No passwords; identity is taken as given.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::ApiError;
use crate::types::{Account, Session, User};

#[derive(Debug)]
pub struct SessionStore {
  ttl: Duration,
  sessions: HashMap<Uuid, Session>,
}

impl SessionStore {
  pub fn new(ttl: Duration) -> Self {
    Self {
      ttl,
      sessions: HashMap::new(),
    }
  }

  /// Start a session. Expired sessions are swept first so unused tokens don't pile up.
  pub fn login(&mut self, user: User, now: DateTime<Utc>) -> Session {
    self.sessions.retain(|_, s| s.expires_at > now);
    let session = Session {
      token: Uuid::new_v4(),
      user,
      created_at: now,
      expires_at: now + self.ttl,
    };
    self.sessions.insert(session.token, session.clone());
    session
  }

  /// Live session for `token`; an expired one is evicted and reported absent.
  pub fn get(&mut self, token: &Uuid, now: DateTime<Utc>) -> Option<Session> {
    let expired = self.sessions.get(token)?.expires_at <= now;
    if expired {
      self.sessions.remove(token);
      return None;
    }
    self.sessions.get(token).cloned()
  }

  pub fn logout(&mut self, token: &Uuid) -> bool {
    self.sessions.remove(token).is_some()
  }

  pub fn len(&self) -> usize {
    self.sessions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.sessions.is_empty()
  }
}

/// Signup form checks shared by customer and business signup.
pub fn validate_identity(name: &str, email: &str) -> Result<(), ApiError> {
  if name.trim().is_empty() {
    return Err(ApiError::validation("name", "Name is required"));
  }
  let valid_email = match email.trim().split_once('@') {
    Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
    None => false,
  };
  if !valid_email {
    return Err(ApiError::validation("email", "Invalid email address"));
  }
  Ok(())
}

pub fn customer(name: &str, email: &str) -> User {
  User {
    name: name.trim().to_string(),
    email: email.trim().to_string(),
    account: Account::Customer,
  }
}

impl Session {
  /// The business this session acts for, or 403 for customers.
  pub fn business_id(&self) -> Result<&str, ApiError> {
    match &self.user.account {
      Account::Business { business_id } => Ok(business_id.as_str()),
      Account::Customer => Err(ApiError::Forbidden("business account required")),
    }
  }

  pub fn require_customer(&self) -> Result<&User, ApiError> {
    match self.user.account {
      Account::Customer => Ok(&self.user),
      Account::Business { .. } => Err(ApiError::Forbidden("customer account required")),
    }
  }
}
