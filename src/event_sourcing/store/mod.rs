// ============================================================================
// Event Sourcing Store - In-Memory Event Log
// ============================================================================
//
// Generic over the event type. State lives for the lifetime of the process.
//
// ============================================================================

pub mod event_store;

pub use event_store::EventStore;
