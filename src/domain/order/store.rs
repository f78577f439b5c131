use std::collections::HashMap;
use uuid::Uuid;

use crate::event_sourcing::{Aggregate, EventEnvelope, EventStore};
use super::aggregate::{placement_event, OrderAggregate};
use super::errors::OrderError;
use super::events::OrderEvent;
use super::value_objects::{NewOrder, OrderId};

// ============================================================================
// Order Store - authoritative in-memory orders
// ============================================================================
//
// Keeps the current state of every order next to the event log it was built
// from. Insertion order is the board order.
//
// ============================================================================

pub struct OrderStore {
    events: EventStore<OrderEvent>,
    orders: HashMap<OrderId, OrderAggregate>,
    order_ids: Vec<OrderId>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self {
            events: EventStore::new("Order"),
            orders: HashMap::new(),
            order_ids: Vec::new(),
        }
    }

    /// Insert an order coming from outside the workflow
    pub fn place(&mut self, order: NewOrder, correlation_id: Uuid) -> Result<i64, OrderError> {
        if self.orders.contains_key(&order.id) {
            return Err(OrderError::AlreadyPlaced(order.id));
        }

        let event = placement_event(&order);
        let mut aggregate = OrderAggregate::apply_first_event(&event)?;

        let envelope = EventEnvelope::new(order.id.as_str(), 1, event, correlation_id);
        let version = self.events.append_events(order.id.as_str(), 0, vec![envelope])?;
        aggregate.set_version(version);

        tracing::debug!(
            order_id = %order.id,
            status = %aggregate.status,
            value = aggregate.value,
            "Order placed"
        );

        self.order_ids.push(order.id.clone());
        self.orders.insert(order.id, aggregate);

        Ok(version)
    }

    /// Record `event` against the order and move it to the event's status.
    ///
    /// Returns the new version, or `None` when the order does not exist.
    /// Legality is the caller's job.
    pub fn transition(
        &mut self,
        order_id: &OrderId,
        event: OrderEvent,
        correlation_id: Uuid,
    ) -> Result<Option<i64>, OrderError> {
        let aggregate = match self.orders.get_mut(order_id) {
            Some(aggregate) => aggregate,
            None => return Ok(None),
        };

        let from = aggregate.status;
        let envelope = EventEnvelope::new(order_id.as_str(), aggregate.version + 1, event.clone(), correlation_id);
        let version = self.events.append_events(order_id.as_str(), aggregate.version, vec![envelope])?;
        aggregate.record(&event, version)?;

        tracing::info!(
            order_id = %order_id,
            from = %from,
            to = %aggregate.status,
            version = version,
            "Order status changed"
        );

        Ok(Some(version))
    }

    pub fn get(&self, order_id: &OrderId) -> Option<&OrderAggregate> {
        self.orders.get(order_id)
    }

    /// Orders in the order they were placed
    pub fn iter(&self) -> impl Iterator<Item = &OrderAggregate> + '_ {
        self.order_ids.iter().filter_map(|id| self.orders.get(id))
    }

    pub fn history(&self, order_id: &OrderId) -> &[EventEnvelope<OrderEvent>] {
        self.events.load_events(order_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::domain::order::{OrderPacked, OrderStatus, PhoneNumber};

    fn new_order(id: &str, status: OrderStatus) -> NewOrder {
        NewOrder {
            id: OrderId::new(id),
            customer: "Karim Mansouri".to_string(),
            phone: PhoneNumber::new("0661987654"),
            value: 12500,
            wilaya: Some("Blida".to_string()),
            status,
        }
    }

    fn packed() -> OrderEvent {
        OrderEvent::Packed(OrderPacked {
            packed_at: Utc::now(),
            packed_items: vec![],
        })
    }

    #[test]
    fn test_place_and_get() {
        let mut store = OrderStore::new();
        let version = store.place(new_order("CMD-1", OrderStatus::PreOrder), Uuid::new_v4()).unwrap();

        assert_eq!(version, 1);
        assert_eq!(store.len(), 1);
        let order = store.get(&OrderId::new("CMD-1")).unwrap();
        assert_eq!(order.status, OrderStatus::PreOrder);
        assert_eq!(order.version, 1);
    }

    #[test]
    fn test_place_duplicate_rejected() {
        let mut store = OrderStore::new();
        store.place(new_order("CMD-1", OrderStatus::PreOrder), Uuid::new_v4()).unwrap();

        let result = store.place(new_order("CMD-1", OrderStatus::Packed), Uuid::new_v4());
        assert!(matches!(result, Err(OrderError::AlreadyPlaced(_))));
        assert_eq!(store.get(&OrderId::new("CMD-1")).unwrap().status, OrderStatus::PreOrder);
    }

    #[test]
    fn test_transition_replaces_status() {
        let mut store = OrderStore::new();
        let id = OrderId::new("CMD-1");
        store.place(new_order("CMD-1", OrderStatus::Confirmed), Uuid::new_v4()).unwrap();

        let version = store.transition(&id, packed(), Uuid::new_v4()).unwrap();
        assert_eq!(version, Some(2));
        assert_eq!(store.get(&id).unwrap().status, OrderStatus::Packed);
        assert_eq!(store.history(&id).len(), 2);
        assert_eq!(store.history(&id)[1].event_type, "OrderPacked");
    }

    #[test]
    fn test_transition_unknown_order_is_noop() {
        let mut store = OrderStore::new();
        store.place(new_order("CMD-1", OrderStatus::Confirmed), Uuid::new_v4()).unwrap();

        let result = store.transition(&OrderId::new("CMD-404"), packed(), Uuid::new_v4()).unwrap();
        assert_eq!(result, None);
        assert!(store.history(&OrderId::new("CMD-404")).is_empty());
        assert_eq!(store.get(&OrderId::new("CMD-1")).unwrap().status, OrderStatus::Confirmed);
    }

    #[test]
    fn test_iter_keeps_placement_order() {
        let mut store = OrderStore::new();
        for id in ["CMD-3", "CMD-1", "CMD-2"] {
            store.place(new_order(id, OrderStatus::PreOrder), Uuid::new_v4()).unwrap();
        }

        let ids: Vec<_> = store.iter().map(|o| o.id.as_str().to_string()).collect();
        assert_eq!(ids, vec!["CMD-3", "CMD-1", "CMD-2"]);
    }
}
