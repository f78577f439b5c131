use std::collections::HashMap;
use anyhow::{Result, bail};

use crate::event_sourcing::core::{DomainEvent, EventEnvelope};

// ============================================================================
// Generic Event Store - Append-Only Log per Aggregate
// ============================================================================
//
// Responsibilities:
// 1. Append events for an aggregate (append-only)
// 2. Load event history for aggregates
// 3. Optimistic concurrency: appends state the version they were built on
//
// Nothing is persisted: a restart starts from an empty log.
//
// ============================================================================

pub struct EventStore<E: DomainEvent> {
    aggregate_type_name: String,  // e.g., "Order"
    streams: HashMap<String, Vec<EventEnvelope<E>>>,
}

impl<E: DomainEvent> EventStore<E> {
    pub fn new(aggregate_type_name: &str) -> Self {
        Self {
            aggregate_type_name: aggregate_type_name.to_string(),
            streams: HashMap::new(),
        }
    }

    /// Append events to the store.
    /// Returns the new version number after appending
    pub fn append_events(
        &mut self,
        aggregate_id: &str,
        expected_version: i64,
        events: Vec<EventEnvelope<E>>,
    ) -> Result<i64> {
        if events.is_empty() {
            bail!("Cannot append empty event list");
        }

        let current_version = self.get_current_version(aggregate_id);
        if current_version != expected_version {
            bail!(
                "Concurrency conflict: expected version {}, but current is {}",
                expected_version,
                current_version
            );
        }

        let event_count = events.len();
        let stream = self.streams.entry(aggregate_id.to_string()).or_default();

        let mut new_version = expected_version;
        for mut envelope in events {
            new_version += 1;
            // Sequence numbers are owned by the store
            envelope.sequence_number = new_version;
            envelope.aggregate_id = aggregate_id.to_string();
            stream.push(envelope);
        }

        tracing::debug!(
            aggregate_id = %aggregate_id,
            aggregate_type = %self.aggregate_type_name,
            new_version = new_version,
            event_count = event_count,
            "Appended events to event store"
        );

        Ok(new_version)
    }

    /// All events for an aggregate, in sequence order
    pub fn load_events(&self, aggregate_id: &str) -> &[EventEnvelope<E>] {
        self.streams
            .get(aggregate_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Current version of an aggregate (0 when it has no events)
    pub fn get_current_version(&self, aggregate_id: &str) -> i64 {
        self.streams
            .get(aggregate_id)
            .and_then(|stream| stream.last())
            .map(|envelope| envelope.sequence_number)
            .unwrap_or(0)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
