use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::event_sourcing::Aggregate;
use super::value_objects::{NewOrder, OrderId, OrderStatus, PhoneNumber, ShippingDetails};
use super::events::*;
use super::commands::OrderCommand;
use super::errors::OrderError;
use super::lifecycle;

// ============================================================================
// Order Aggregate - Domain Logic
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAggregate {
    // Identity
    pub id: OrderId,
    pub version: i64,

    // Current State (derived from events)
    pub customer: String,
    pub phone: PhoneNumber,
    pub value: u64,
    pub wilaya: Option<String>,
    pub status: OrderStatus,

    // Audit Trail
    pub placed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // Filled in along the lifecycle
    pub call_notes: Option<String>,
    pub packed_items: Vec<String>,
    pub shipment: Option<ShippingDetails>,
    pub return_reason: Option<String>,
}

impl OrderAggregate {
    /// Apply an event and move the version forward.
    ///
    /// No legality check happens here; events are facts.
    pub fn record(&mut self, event: &OrderEvent, version: i64) -> Result<(), OrderError> {
        self.apply_event(event)?;
        self.version = version;
        Ok(())
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl Aggregate for OrderAggregate {
    type Event = OrderEvent;
    type Command = OrderCommand;
    type Error = OrderError;

    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error> {
        match event {
            OrderEvent::Placed(e) => Ok(Self {
                id: e.order_id.clone(),
                version: 0,
                customer: e.customer.clone(),
                phone: e.phone.clone(),
                value: e.value,
                wilaya: e.wilaya.clone(),
                status: e.status,
                placed_at: e.placed_at,
                updated_at: e.placed_at,
                call_notes: None,
                packed_items: Vec::new(),
                shipment: None,
                return_reason: None,
            }),
            _ => Err(OrderError::NotInitialized),
        }
    }

    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error> {
        match event {
            OrderEvent::Placed(_) => {
                // First event already applied
                return Ok(());
            }
            OrderEvent::Confirmed(e) => {
                self.call_notes = e.call_notes.clone();
                self.updated_at = e.confirmed_at;
            }
            OrderEvent::Packed(e) => {
                self.packed_items = e.packed_items.clone();
                self.updated_at = e.packed_at;
            }
            OrderEvent::Shipped(e) => {
                self.wilaya = Some(e.shipment.wilaya.clone());
                self.shipment = Some(e.shipment.clone());
                self.updated_at = e.shipped_at;
            }
            OrderEvent::Delivered(e) => {
                self.updated_at = e.delivered_at;
            }
            OrderEvent::Returned(e) => {
                self.return_reason = e.reason.clone();
                self.updated_at = e.returned_at;
            }
        }

        self.status = event.resulting_status();
        Ok(())
    }

    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        // Every command but placement walks one edge of the lifecycle table
        if let Some(step) = command.step() {
            lifecycle::next_status(self.status, step)?;
        }

        let now = Utc::now();
        let event = match command {
            OrderCommand::PlaceOrder(order) => {
                return Err(OrderError::AlreadyPlaced(order.id.clone()));
            }
            OrderCommand::ConfirmOrder { call_notes } => OrderEvent::Confirmed(OrderConfirmed {
                confirmed_at: now,
                call_notes: call_notes.clone(),
            }),
            OrderCommand::PackOrder { packed_items } => OrderEvent::Packed(OrderPacked {
                packed_at: now,
                packed_items: packed_items.clone(),
            }),
            OrderCommand::ShipOrder { shipment } => OrderEvent::Shipped(OrderShipped {
                shipped_at: now,
                shipment: shipment.clone(),
            }),
            OrderCommand::MarkDelivered => OrderEvent::Delivered(OrderDelivered {
                delivered_at: now,
            }),
            OrderCommand::MarkReturned { reason } => OrderEvent::Returned(OrderReturned {
                returned_at: now,
                reason: reason.clone(),
            }),
        };

        Ok(vec![event])
    }

    fn aggregate_id(&self) -> &str {
        self.id.as_str()
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}

/// First event for an order entering the workflow
pub fn placement_event(order: &NewOrder) -> OrderEvent {
    OrderEvent::Placed(OrderPlaced {
        order_id: order.id.clone(),
        customer: order.customer.clone(),
        phone: order.phone.clone(),
        value: order.value,
        wilaya: order.wilaya.clone(),
        status: order.status,
        placed_at: Utc::now(),
    })
}

// ============================================================================
// Unit Tests
// ============================================================================
