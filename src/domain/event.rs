//! Domain event contract.

use serde_json::Value;

/// An immutable record of a fact that has already occurred.
///
/// Events are created by domain logic, buffered on the aggregate that
/// produced them, and handed to the event bus after the owning transaction
/// commits. They carry outcome data only - never credentials or other
/// sensitive input.
pub trait DomainEvent: std::fmt::Debug + Send + Sync {
    /// Stable name downstream consumers subscribe to,
    /// e.g. `membership.user.registered`.
    fn name(&self) -> &'static str;

    /// Transmissible payload, validated when the event was constructed.
    fn payload(&self) -> Value;
}
