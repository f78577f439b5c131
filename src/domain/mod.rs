// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Aggregates live in their own subdirectory with value objects, events,
// commands, errors, the aggregate itself and its command handler.
// Nothing here depends on the workflow or on how orders are displayed.
//
// ============================================================================

pub mod order;
