use super::value_objects::{
    DeliveryOutcome, NewOrder, ShippingDetails, Step, WorkflowAction,
};

// ============================================================================
// Order Commands - Represent operator intent
// ============================================================================

#[derive(Debug, Clone)]
pub enum OrderCommand {
    PlaceOrder(NewOrder),
    ConfirmOrder {
        call_notes: Option<String>,
    },
    PackOrder {
        packed_items: Vec<String>,
    },
    ShipOrder {
        shipment: ShippingDetails,
    },
    MarkDelivered,
    MarkReturned {
        reason: Option<String>,
    },
}

impl OrderCommand {
    /// Lifecycle edge this command walks; `None` for placement
    pub fn step(&self) -> Option<Step> {
        match self {
            OrderCommand::PlaceOrder(_) => None,
            OrderCommand::ConfirmOrder { .. } => Some(Step::Panel(WorkflowAction::Confirm)),
            OrderCommand::PackOrder { .. } => Some(Step::Panel(WorkflowAction::Pack)),
            OrderCommand::ShipOrder { .. } => Some(Step::Panel(WorkflowAction::Ship)),
            OrderCommand::MarkDelivered => Some(Step::Direct(DeliveryOutcome::Delivered)),
            OrderCommand::MarkReturned { .. } => Some(Step::Direct(DeliveryOutcome::Returned)),
        }
    }
}
