// ============================================================================
// Event Sourcing Core - Generic Abstractions
// ============================================================================
//
// Nothing in here knows about orders. The aggregate trait and the event
// envelope work for any domain type.
//
// ============================================================================

pub mod aggregate;
pub mod event;

pub use aggregate::Aggregate;
pub use event::{DomainEvent, EventEnvelope, serialize_event, deserialize_event};
