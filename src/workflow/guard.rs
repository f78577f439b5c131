use serde::{Deserialize, Serialize};

use crate::domain::order::{OrderId, WorkflowAction};

// ============================================================================
// Single-Flight Guard
// ============================================================================
//
// One action panel across the whole desk. A request made while a panel is
// open is dropped, not queued.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenPanel {
    pub order_id: OrderId,
    pub action: WorkflowAction,
}

/// Rejection returned while another panel is open
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Action Blocked: a {} panel is already open for order {}", .open.action, .open.order_id)]
pub struct PanelBlocked {
    pub open: OpenPanel,
}

#[derive(Debug, Default)]
pub struct PanelGuard {
    open: Option<OpenPanel>,
}

impl PanelGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_open(&mut self, order_id: &OrderId, action: WorkflowAction) -> Result<(), PanelBlocked> {
        if let Some(open) = &self.open {
            return Err(PanelBlocked { open: open.clone() });
        }

        self.open = Some(OpenPanel {
            order_id: order_id.clone(),
            action,
        });
        Ok(())
    }

    /// Close whatever is open. Closing an idle guard does nothing.
    pub fn close(&mut self) -> Option<OpenPanel> {
        self.open.take()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current(&self) -> Option<&OpenPanel> {
        self.open.as_ref()
    }
}
