use crate::domain::order::{OrderError, OrderId, WorkflowAction};
use super::guard::PanelBlocked;

// ============================================================================
// Workflow Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Blocked(#[from] PanelBlocked),

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("No action panel is open")]
    NoOpenPanel,

    #[error("A {submitted} submission cannot save the open {open} panel")]
    SubmissionMismatch {
        open: WorkflowAction,
        submitted: WorkflowAction,
    },

    #[error(transparent)]
    Order(#[from] OrderError),
}

impl WorkflowError {
    /// True for the single-flight rejection, which is a warning, not a failure
    pub fn is_blocked(&self) -> bool {
        matches!(self, WorkflowError::Blocked(_))
    }
}
