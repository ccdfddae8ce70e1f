//! Message contracts for commands and queries.
//!
//! A message is immutable once constructed and carries only transmissible
//! fields, so it can cross a queue, RPC or log boundary without silent data
//! loss. Concrete message types run `ensure_transmissible` in their
//! constructors; a failure there is a programmer error surfaced immediately,
//! not something handlers catch.

use serde::Serialize;

use crate::domain::transmissible;
use crate::errors::{AppError, AppResult};

/// Base contract shared by commands and queries.
pub trait Message: Serialize {
    /// Validate every field recursively against the closed transmissible set
    /// (string, number, boolean, null, homogeneous list, string-keyed
    /// mapping). Fails with `AppError::Validation` naming the field.
    fn ensure_transmissible(&self) -> AppResult<()>
    where
        Self: Sized,
    {
        let value = serde_json::to_value(self)
            .map_err(|e| AppError::validation(format!("message does not serialize: {e}")))?;
        transmissible::check_fields("message", &value)
    }
}

/// A request to change state.
pub trait Command: Message {}

/// A request to read state. No mutation implied.
pub trait Query: Message {}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Serialize;

    use super::*;
    use crate::errors::AppError;

    #[derive(Serialize)]
    struct PlainMessage {
        user_id: String,
        count: u32,
        active: bool,
        tags: Vec<String>,
        attributes: BTreeMap<String, String>,
    }

    impl Message for PlainMessage {}

    #[derive(Serialize)]
    struct TupleFieldMessage {
        // Serializes to a mixed-kind list, which the wire contract forbids.
        pair: (String, u32),
    }

    impl Message for TupleFieldMessage {}

    #[derive(Serialize)]
    struct BadKeyMessage {
        lookup: BTreeMap<(u8, u8), String>,
    }

    impl Message for BadKeyMessage {}

    #[test]
    fn test_primitive_fields_pass() {
        let message = PlainMessage {
            user_id: "u-1".to_string(),
            count: 3,
            active: true,
            tags: vec!["a".to_string(), "b".to_string()],
            attributes: BTreeMap::from([("plan".to_string(), "monthly".to_string())]),
        };
        assert!(message.ensure_transmissible().is_ok());
    }

    #[test]
    fn test_tuple_field_is_rejected() {
        let message = TupleFieldMessage {
            pair: ("a".to_string(), 1),
        };
        let err = message.ensure_transmissible().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("pair"));
    }

    #[test]
    fn test_non_string_map_keys_are_rejected() {
        let message = BadKeyMessage {
            lookup: BTreeMap::from([((1, 2), "x".to_string())]),
        };
        let err = message.ensure_transmissible().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
