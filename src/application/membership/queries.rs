//! Membership queries.

use serde::Serialize;

use crate::application::message::{Message, Query};
use crate::errors::AppResult;

/// Look up a member by email address.
#[derive(Debug, Clone, Serialize)]
pub struct GetUserByEmail {
    email: String,
}

impl GetUserByEmail {
    pub fn new(email: impl Into<String>) -> AppResult<Self> {
        let query = Self {
            email: email.into(),
        };
        query.ensure_transmissible()?;
        Ok(query)
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl Message for GetUserByEmail {}
impl Query for GetUserByEmail {}
