//! Aggregate root base type.
//!
//! DDD: the consistency boundary entity. State changes record domain events
//! into a buffer that only the owning aggregate can touch; the handler drains
//! it once, after the transaction commits.

use uuid::Uuid;

use super::event::DomainEvent;

/// Identity plus the private buffer of pending domain events.
///
/// Entities embed this by composition. The buffer is exclusively owned:
/// `record` is crate-private and there is no other mutation path, so event
/// order is exactly recording order.
#[derive(Debug)]
pub struct AggregateRoot {
    id: Uuid,
    events: Vec<Box<dyn DomainEvent>>,
}

impl AggregateRoot {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            events: Vec::new(),
        }
    }

    /// Stable identity of the aggregate instance.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Append a pending event in O(1).
    pub(crate) fn record(&mut self, event: Box<dyn DomainEvent>) {
        self.events.push(event);
    }

    /// Return all pending events in recording order and clear the buffer.
    ///
    /// Draining is destructive: a second call on the same instance returns
    /// an empty sequence.
    pub fn drain_events(&mut self) -> Vec<Box<dyn DomainEvent>> {
        std::mem::take(&mut self.events)
    }

    /// Number of events recorded but not yet drained.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    #[derive(Debug)]
    struct SampleEvent {
        label: &'static str,
    }

    impl DomainEvent for SampleEvent {
        fn name(&self) -> &'static str {
            "sample.happened"
        }

        fn payload(&self) -> Value {
            json!({ "label": self.label })
        }
    }

    #[test]
    fn test_drain_returns_events_in_recording_order() {
        let mut root = AggregateRoot::new(Uuid::new_v4());
        root.record(Box::new(SampleEvent { label: "first" }));
        root.record(Box::new(SampleEvent { label: "second" }));

        let events = root.drain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].payload()["label"], "first");
        assert_eq!(events[1].payload()["label"], "second");
    }

    #[test]
    fn test_second_drain_is_empty() {
        let mut root = AggregateRoot::new(Uuid::new_v4());
        root.record(Box::new(SampleEvent { label: "only" }));

        assert_eq!(root.drain_events().len(), 1);
        assert!(root.drain_events().is_empty());
        assert_eq!(root.pending_events(), 0);
    }
}
