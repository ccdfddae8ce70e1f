//! Transmissible payload validation.
//!
//! Commands, queries and domain events routinely cross process boundaries
//! (queue, RPC, log). Every field they carry must therefore stay inside a
//! closed set of wire-safe kinds: string, number, boolean, null, homogeneous
//! list, string-keyed mapping. The check runs at message construction so a
//! non-transmissible field fails loudly instead of losing data in transit.
//!
//! The compiler already rejects most offenders (a type without `Serialize`
//! cannot enter a message). This runtime walk guards what the type system
//! cannot: hand-written `Serialize` impls, non-string map keys, and
//! mixed-kind sequences such as tuples.

use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// Wire-level kind of a JSON value.
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

/// Validate a single serialized value recursively.
///
/// `path` names the field under inspection and grows as the walk descends,
/// so the error pinpoints the offending leaf (`tags[2]`, `profile.age`).
pub fn check(path: &str, value: &Value) -> AppResult<()> {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(()),
        Value::Array(items) => {
            let expected = items.first().map(kind);
            for (index, item) in items.iter().enumerate() {
                if Some(kind(item)) != expected {
                    return Err(AppError::validation(format!(
                        "field `{}[{}]` is not transmissible: lists must be homogeneous, \
                         expected {} but found {}",
                        path,
                        index,
                        expected.unwrap_or("nothing"),
                        kind(item),
                    )));
                }
                check(&format!("{path}[{index}]"), item)?;
            }
            Ok(())
        }
        Value::Object(entries) => {
            for (key, entry) in entries {
                check(&format!("{path}.{key}"), entry)?;
            }
            Ok(())
        }
    }
}

/// Validate every top-level field of an object-shaped payload.
pub fn check_fields(what: &str, payload: &Value) -> AppResult<()> {
    match payload {
        Value::Object(fields) => {
            for (name, value) in fields {
                check(name, value)?;
            }
            Ok(())
        }
        other => Err(AppError::validation(format!(
            "{} must serialize to a mapping of named fields, got {}",
            what,
            kind(other),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::AppError;

    #[test]
    fn test_primitives_pass() {
        for value in [json!(null), json!(true), json!(42), json!(1.5), json!("text")] {
            assert!(check("field", &value).is_ok());
        }
    }

    #[test]
    fn test_nested_homogeneous_structures_pass() {
        let value = json!({
            "tags": ["a", "b", "c"],
            "scores": [[1, 2], [3, 4]],
            "profile": { "name": "Jo", "age": 30 },
        });
        assert!(check_fields("message", &value).is_ok());
    }

    #[test]
    fn test_mixed_kind_list_is_rejected() {
        let value = json!(["a", 1]);
        let err = check("pair", &value).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("pair[1]"));
    }

    #[test]
    fn test_error_names_the_nested_field() {
        let payload = json!({ "outer": { "inner": [true, "oops"] } });
        let err = check_fields("message", &payload).unwrap_err();
        assert!(err.to_string().contains("outer.inner[1]"));
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        let err = check_fields("message", &json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
