//! Membership domain events.

use serde_json::{json, Value};
use uuid::Uuid;

use super::event::DomainEvent;
use super::transmissible;
use crate::errors::AppResult;

/// A new member completed registration.
///
/// Carries outcome data only: identity, normalized email and names.
/// The password - plaintext or hashed - is deliberately absent.
#[derive(Debug, Clone)]
pub struct UserRegistered {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserRegistered {
    /// Build the event, validating its payload against the transmissible set.
    pub fn new(
        user_id: Uuid,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> AppResult<Self> {
        let event = Self {
            user_id,
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        };
        transmissible::check_fields("event", &event.payload())?;
        Ok(event)
    }
}

impl DomainEvent for UserRegistered {
    fn name(&self) -> &'static str {
        "membership.user.registered"
    }

    fn payload(&self) -> Value {
        json!({
            "user_id": self.user_id,
            "email": self.email,
            "first_name": self.first_name,
            "last_name": self.last_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_carries_outcome_data_only() {
        let id = Uuid::new_v4();
        let event = UserRegistered::new(id, "jo@example.com", "Jo", "Doe").unwrap();

        let payload = event.payload();
        assert_eq!(payload["user_id"], id.to_string());
        assert_eq!(payload["email"], "jo@example.com");
        assert_eq!(payload["first_name"], "Jo");
        assert_eq!(payload["last_name"], "Doe");
        assert!(!payload.to_string().contains("password"));
    }
}
