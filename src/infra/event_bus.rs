//! Event bus adapters.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::application::EventBus;
use crate::domain::DomainEvent;
use crate::errors::AppResult;

/// Publishes events as structured log records.
///
/// Delivery is best-effort by contract; consumers that need durable delivery
/// plug a queue-backed bus into the same port instead.
pub struct LoggingEventBus;

#[async_trait]
impl EventBus for LoggingEventBus {
    async fn publish(&self, events: Vec<Box<dyn DomainEvent>>) -> AppResult<()> {
        for event in events {
            tracing::info!(
                event = event.name(),
                payload = %event.payload(),
                "domain event published"
            );
        }
        Ok(())
    }
}

/// Collects published events in memory, in publication order.
///
/// The in-process counterpart of a broker-backed bus; the test suite uses it
/// to assert on what a handler published.
#[derive(Default)]
pub struct InMemoryEventBus {
    published: Mutex<Vec<Box<dyn DomainEvent>>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far as (name, payload) pairs.
    pub fn published(&self) -> Vec<(String, Value)> {
        self.published
            .lock()
            .expect("event bus mutex poisoned")
            .iter()
            .map(|event| (event.name().to_string(), event.payload()))
            .collect()
    }

    /// Number of events published so far.
    pub fn published_count(&self) -> usize {
        self.published.lock().expect("event bus mutex poisoned").len()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, events: Vec<Box<dyn DomainEvent>>) -> AppResult<()> {
        self.published
            .lock()
            .expect("event bus mutex poisoned")
            .extend(events);
        Ok(())
    }
}
