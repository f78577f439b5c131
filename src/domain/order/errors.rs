use super::value_objects::{OrderId, OrderStatus, Step};

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Cannot {step} an order in status {status}")]
    InvalidTransition { status: OrderStatus, step: Step },

    #[error("Order is closed in status {0}")]
    Terminal(OrderStatus),

    #[error("Order not found: {0}")]
    NotFound(OrderId),

    #[error("Order already exists: {0}")]
    AlreadyPlaced(OrderId),

    #[error("Unknown order status: {0}")]
    UnknownStatus(String),

    #[error("Aggregate not initialized")]
    NotInitialized,

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
