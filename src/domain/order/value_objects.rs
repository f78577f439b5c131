use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use super::errors::OrderError;

// ============================================================================
// Order Value Objects
// ============================================================================

/// Order identifier as shown on the back-office board (e.g. `CMD-1001`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Customer phone number, as typed by whoever created the order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber(pub String);

impl PhoneNumber {
    pub fn new(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// National form used as the blacklist join key.
    ///
    /// Separators are dropped and the `+213` / `00213` prefixes are folded
    /// into the leading `0`, so `+213 555 12-34-56` becomes `0555123456`.
    pub fn normalized(&self) -> String {
        normalize_phone(&self.0)
    }
}

pub fn normalize_phone(raw: &str) -> String {
    let compact: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-' | '(' | ')'))
        .collect();

    if let Some(rest) = compact.strip_prefix("+213") {
        format!("0{}", rest)
    } else if let Some(rest) = compact.strip_prefix("00213") {
        format!("0{}", rest)
    } else {
        compact
    }
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    PreOrder,
    Confirmed,
    Packed,
    Shipped,
    Delivered,
    Returned,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::PreOrder,
        OrderStatus::Confirmed,
        OrderStatus::Packed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Returned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::PreOrder => "pre-order",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Packed => "packed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Returned => "returned",
        }
    }

    /// Delivered and returned orders accept no further step
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Returned)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| OrderError::UnknownStatus(s.to_string()))
    }
}

/// Operator action that opens a tool panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowAction {
    Confirm,
    Pack,
    Ship,
}

impl WorkflowAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowAction::Confirm => "confirm",
            WorkflowAction::Pack => "pack",
            WorkflowAction::Ship => "ship",
        }
    }
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final outcome of a shipped order, committed directly without a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryOutcome {
    Delivered,
    Returned,
}

/// One edge of the lifecycle, as offered to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "step", rename_all = "lowercase")]
pub enum Step {
    Panel(WorkflowAction),
    Direct(DeliveryOutcome),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Panel(action) => write!(f, "{}", action),
            Step::Direct(DeliveryOutcome::Delivered) => f.write_str("mark delivered"),
            Step::Direct(DeliveryOutcome::Returned) => f.write_str("mark returned"),
        }
    }
}

/// Data captured by the shipping/location form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub wilaya: String,
    pub address: String,
    pub carrier: String,
    pub tracking_number: Option<String>,
}

/// An order as it arrives from outside the workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub id: OrderId,
    pub customer: String,
    pub phone: PhoneNumber,
    /// Amount in DZD, collected on delivery
    pub value: u64,
    pub wilaya: Option<String>,
    pub status: OrderStatus,
}

// ============================================================================
// Unit Tests
// ============================================================================
