use super::errors::OrderError;
use super::value_objects::{DeliveryOutcome, OrderStatus, Step, WorkflowAction};

// ============================================================================
// Order Lifecycle - the one transition table
// ============================================================================
//
//   pre-order --confirm--> confirmed --pack--> packed --ship--> shipped
//   shipped --delivered--> delivered
//   shipped --returned---> returned
//
// ============================================================================

const TRANSITIONS: [(OrderStatus, Step, OrderStatus); 5] = [
    (OrderStatus::PreOrder, Step::Panel(WorkflowAction::Confirm), OrderStatus::Confirmed),
    (OrderStatus::Confirmed, Step::Panel(WorkflowAction::Pack), OrderStatus::Packed),
    (OrderStatus::Packed, Step::Panel(WorkflowAction::Ship), OrderStatus::Shipped),
    (OrderStatus::Shipped, Step::Direct(DeliveryOutcome::Delivered), OrderStatus::Delivered),
    (OrderStatus::Shipped, Step::Direct(DeliveryOutcome::Returned), OrderStatus::Returned),
];

/// Status reached by taking `step` from `from`.
pub fn next_status(from: OrderStatus, step: Step) -> Result<OrderStatus, OrderError> {
    if from.is_terminal() {
        return Err(OrderError::Terminal(from));
    }

    TRANSITIONS
        .iter()
        .find(|(status, edge, _)| *status == from && *edge == step)
        .map(|(_, _, to)| *to)
        .ok_or(OrderError::InvalidTransition { status: from, step })
}

/// Steps the operator may take from `status`, in display order.
pub fn offered_steps(status: OrderStatus) -> Vec<Step> {
    TRANSITIONS
        .iter()
        .filter(|(from, _, _)| *from == status)
        .map(|(_, step, _)| *step)
        .collect()
}
