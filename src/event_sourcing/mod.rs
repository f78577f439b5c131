// ============================================================================
// Event Sourcing Infrastructure
// ============================================================================
//
// Generic, reusable event log infrastructure.
// Domain-specific code is in src/domain/
//
// ============================================================================

mod core;
mod store;

pub use core::*;
pub use store::*;
