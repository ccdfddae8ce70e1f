//! Membership commands.

use serde::Serialize;

use crate::application::message::{Command, Message};
use crate::errors::AppResult;

/// Register a new member.
///
/// Carries the raw input exactly as submitted; normalization and strength
/// checks happen in the domain when the handler runs. Fields are private:
/// a command never changes after construction.
#[derive(Clone, Serialize)]
pub struct RegisterUser {
    email: String,
    password: String,
    first_name: String,
    last_name: String,
}

// The raw password stays out of debug output (security)
impl std::fmt::Debug for RegisterUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUser")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

impl RegisterUser {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> AppResult<Self> {
        let command = Self {
            email: email.into(),
            password: password.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        };
        command.ensure_transmissible()?;
        Ok(command)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

impl Message for RegisterUser {}
impl Command for RegisterUser {}

/// Authenticate an existing member and issue an access token.
#[derive(Clone, Serialize)]
pub struct AuthenticateUser {
    email: String,
    password: String,
}

impl std::fmt::Debug for AuthenticateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticateUser")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl AuthenticateUser {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> AppResult<Self> {
        let command = Self {
            email: email.into(),
            password: password.into(),
        };
        command.ensure_transmissible()?;
        Ok(command)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl Message for AuthenticateUser {}
impl Command for AuthenticateUser {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_user_constructs_and_exposes_fields() {
        let command = RegisterUser::new("jo@example.com", "StrongPass1!", "Jo", "Doe").unwrap();
        assert_eq!(command.email(), "jo@example.com");
        assert_eq!(command.first_name(), "Jo");
        assert_eq!(command.last_name(), "Doe");
    }

    #[test]
    fn test_debug_redacts_password() {
        let command = RegisterUser::new("jo@example.com", "StrongPass1!", "Jo", "Doe").unwrap();
        let rendered = format!("{command:?}");
        assert!(!rendered.contains("StrongPass1!"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
