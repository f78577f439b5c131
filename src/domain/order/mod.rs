// ============================================================================
// Order Domain - Business Logic for the Confirmation Workflow
// ============================================================================
//
// All order-specific code lives here:
// - Value objects (OrderId, OrderStatus, WorkflowAction, ShippingDetails)
// - Lifecycle (the transition table)
// - Events and Commands
// - Errors (OrderError enum)
// - Aggregate (OrderAggregate)
// - Store (OrderStore) and Command Handler
//
// ============================================================================

pub mod value_objects;
pub mod lifecycle;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod store;
pub mod command_handler;

// Re-export for convenience
pub use value_objects::*;
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use store::*;
pub use command_handler::*;
