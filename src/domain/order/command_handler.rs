use uuid::Uuid;

use crate::event_sourcing::Aggregate;

use super::commands::OrderCommand;
use super::errors::OrderError;
use super::store::OrderStore;
use super::value_objects::OrderId;

// ============================================================================
// Order Command Handler
// ============================================================================
//
// Orchestrates: Command → Aggregate → Events → Order Store
//
// ============================================================================

pub struct OrderCommandHandler {
    store: OrderStore,
}

impl OrderCommandHandler {
    pub fn new(store: OrderStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    /// Handle a command and record the resulting events.
    /// Returns the order's version afterwards.
    pub fn handle(
        &mut self,
        order_id: &OrderId,
        command: OrderCommand,
        correlation_id: Uuid,
    ) -> Result<i64, OrderError> {
        if let OrderCommand::PlaceOrder(order) = command {
            return self.store.place(order, correlation_id);
        }

        let aggregate = self
            .store
            .get(order_id)
            .ok_or_else(|| OrderError::NotFound(order_id.clone()))?;

        let mut version = aggregate.version();
        let domain_events = aggregate.handle_command(&command)?;

        for domain_event in domain_events {
            version = self
                .store
                .transition(order_id, domain_event, correlation_id)?
                .ok_or_else(|| OrderError::NotFound(order_id.clone()))?;
        }

        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{NewOrder, OrderStatus, PhoneNumber, Step, WorkflowAction};

    fn handler_with(status: OrderStatus) -> (OrderCommandHandler, OrderId) {
        let id = OrderId::new("CMD-2001");
        let mut handler = OrderCommandHandler::new(OrderStore::new());
        handler
            .handle(
                &id,
                OrderCommand::PlaceOrder(NewOrder {
                    id: id.clone(),
                    customer: "Sara Khelifi".to_string(),
                    phone: PhoneNumber::new("0661987654"),
                    value: 9000,
                    wilaya: Some("Oran".to_string()),
                    status,
                }),
                Uuid::new_v4(),
            )
            .unwrap();
        (handler, id)
    }

    #[test]
    fn test_handle_confirm() {
        let (mut handler, id) = handler_with(OrderStatus::PreOrder);

        let version = handler
            .handle(&id, OrderCommand::ConfirmOrder { call_notes: None }, Uuid::new_v4())
            .unwrap();

        assert_eq!(version, 2);
        assert_eq!(handler.store().get(&id).unwrap().status, OrderStatus::Confirmed);
    }

    #[test]
    fn test_handle_rejects_illegal_command_without_recording() {
        let (mut handler, id) = handler_with(OrderStatus::PreOrder);

        let result = handler.handle(&id, OrderCommand::PackOrder { packed_items: vec![] }, Uuid::new_v4());

        assert!(matches!(
            result,
            Err(OrderError::InvalidTransition { step: Step::Panel(WorkflowAction::Pack), .. })
        ));
        assert_eq!(handler.store().history(&id).len(), 1);
        assert_eq!(handler.store().get(&id).unwrap().status, OrderStatus::PreOrder);
    }

    #[test]
    fn test_handle_unknown_order() {
        let (mut handler, _) = handler_with(OrderStatus::Shipped);

        let missing = OrderId::new("CMD-404");
        let result = handler.handle(&missing, OrderCommand::MarkDelivered, Uuid::new_v4());
        assert!(matches!(result, Err(OrderError::NotFound(id)) if id == missing));
    }

    #[test]
    fn test_correlation_id_is_recorded() {
        let (mut handler, id) = handler_with(OrderStatus::Shipped);
        let correlation_id = Uuid::new_v4();

        handler
            .handle(&id, OrderCommand::MarkReturned { reason: None }, correlation_id)
            .unwrap();

        let history = handler.store().history(&id);
        assert_eq!(history.last().unwrap().correlation_id, correlation_id);
    }
}
