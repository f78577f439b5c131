use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::event_sourcing::DomainEvent;
use super::value_objects::{OrderId, OrderStatus, PhoneNumber, ShippingDetails};

// ============================================================================
// Order Events - Domain Events for Order Aggregate
// ============================================================================

/// Order Event - Union type for all order events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    Placed(OrderPlaced),
    Confirmed(OrderConfirmed),
    Packed(OrderPacked),
    Shipped(OrderShipped),
    Delivered(OrderDelivered),
    Returned(OrderReturned),
}

impl OrderEvent {
    /// Status the order holds once this event is applied
    pub fn resulting_status(&self) -> OrderStatus {
        match self {
            OrderEvent::Placed(e) => e.status,
            OrderEvent::Confirmed(_) => OrderStatus::Confirmed,
            OrderEvent::Packed(_) => OrderStatus::Packed,
            OrderEvent::Shipped(_) => OrderStatus::Shipped,
            OrderEvent::Delivered(_) => OrderStatus::Delivered,
            OrderEvent::Returned(_) => OrderStatus::Returned,
        }
    }
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::Placed(_) => "OrderPlaced",
            OrderEvent::Confirmed(_) => "OrderConfirmed",
            OrderEvent::Packed(_) => "OrderPacked",
            OrderEvent::Shipped(_) => "OrderShipped",
            OrderEvent::Delivered(_) => "OrderDelivered",
            OrderEvent::Returned(_) => "OrderReturned",
        }
    }
}

// ============================================================================
// Individual Event Types
// ============================================================================

/// Order Placed - the order enters the workflow, possibly mid-lifecycle
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderPlaced {
    pub order_id: OrderId,
    pub customer: String,
    pub phone: PhoneNumber,
    pub value: u64,
    pub wilaya: Option<String>,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
}

/// Order Confirmed - customer reached by phone and agreed
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderConfirmed {
    pub confirmed_at: DateTime<Utc>,
    pub call_notes: Option<String>,
}

/// Order Packed - parcel prepared against the checklist
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderPacked {
    pub packed_at: DateTime<Utc>,
    pub packed_items: Vec<String>,
}

/// Order Shipped - parcel handed to the carrier
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderShipped {
    pub shipped_at: DateTime<Utc>,
    pub shipment: ShippingDetails,
}

/// Order Delivered - cash collected, parcel accepted
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderDelivered {
    pub delivered_at: DateTime<Utc>,
}

/// Order Returned - parcel refused or undeliverable (rotour)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderReturned {
    pub returned_at: DateTime<Utc>,
    pub reason: Option<String>,
}
