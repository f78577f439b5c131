use serde::{Deserialize, Serialize};

use crate::domain::order::lifecycle;
use crate::domain::order::{
    OrderAggregate, OrderCommand, OrderError, OrderId, OrderStatus, ShippingDetails, Step,
    WorkflowAction,
};
use crate::risk::RiskHints;

// ============================================================================
// Action Panel Selector
// ============================================================================
//
//   confirm (pre-order) -> call script       -> confirmed
//   pack    (confirmed) -> packing checklist -> packed
//   ship    (packed)    -> shipping form     -> shipped
//
// ============================================================================

/// Static panel contents that come from configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    pub packing_checklist: Vec<String>,
    pub carriers: Vec<String>,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            packing_checklist: vec![
                "Articles conformes à la commande".to_string(),
                "Produit testé et en bon état".to_string(),
                "Emballage protégé et scellé".to_string(),
                "Bon de livraison imprimé".to_string(),
            ],
            carriers: vec![
                "Yalidine".to_string(),
                "ZR Express".to_string(),
                "Maystro Delivery".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "kebab-case")]
pub enum PanelTool {
    CallScript { lines: Vec<String> },
    PackingChecklist { items: Vec<String> },
    ShippingForm { wilaya: Option<String>, carriers: Vec<String> },
}

/// What the desk shows while a panel is open
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelView {
    pub order_id: OrderId,
    pub customer: String,
    pub value: u64,
    pub action: WorkflowAction,
    pub tool: PanelTool,
    pub hints: RiskHints,
    /// Status the order moves to when the panel is saved
    pub commits_to: OrderStatus,
}

/// Data handed back by a panel on save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "panel", rename_all = "lowercase")]
pub enum PanelSubmission {
    Call { notes: Option<String> },
    Packing { checked_items: Vec<String> },
    Shipping(ShippingDetails),
}

impl PanelSubmission {
    pub fn action(&self) -> WorkflowAction {
        match self {
            PanelSubmission::Call { .. } => WorkflowAction::Confirm,
            PanelSubmission::Packing { .. } => WorkflowAction::Pack,
            PanelSubmission::Shipping(_) => WorkflowAction::Ship,
        }
    }

    pub fn into_command(self) -> OrderCommand {
        match self {
            PanelSubmission::Call { notes } => OrderCommand::ConfirmOrder { call_notes: notes },
            PanelSubmission::Packing { checked_items } => OrderCommand::PackOrder {
                packed_items: checked_items,
            },
            PanelSubmission::Shipping(shipment) => OrderCommand::ShipOrder { shipment },
        }
    }
}

/// Build the panel for `action` on `order`, or say why it cannot open.
pub fn select_panel(
    order: &OrderAggregate,
    action: WorkflowAction,
    hints: RiskHints,
    settings: &PanelSettings,
) -> Result<PanelView, OrderError> {
    let commits_to = lifecycle::next_status(order.status, Step::Panel(action))?;

    let tool = match action {
        WorkflowAction::Confirm => PanelTool::CallScript {
            lines: call_script(order),
        },
        WorkflowAction::Pack => PanelTool::PackingChecklist {
            items: settings.packing_checklist.clone(),
        },
        WorkflowAction::Ship => PanelTool::ShippingForm {
            wilaya: order.wilaya.clone(),
            carriers: settings.carriers.clone(),
        },
    };

    Ok(PanelView {
        order_id: order.id.clone(),
        customer: order.customer.clone(),
        value: order.value,
        action,
        tool,
        hints,
        commits_to,
    })
}

fn call_script(order: &OrderAggregate) -> Vec<String> {
    let address_line = match &order.wilaya {
        Some(wilaya) => format!(
            "La livraison est prévue à {}, pouvez-vous confirmer l'adresse exacte ?",
            wilaya
        ),
        None => "Pouvez-vous nous indiquer votre wilaya et votre adresse exacte ?".to_string(),
    };

    vec![
        format!(
            "Bonjour {}, je vous appelle au sujet de votre commande {}.",
            order.customer, order.id
        ),
        format!("Le montant à régler à la livraison est de {} DA.", order.value),
        address_line,
        "Serez-vous disponible pour réceptionner le colis dans les prochains jours ?".to_string(),
    ]
}
