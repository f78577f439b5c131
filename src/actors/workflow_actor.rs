use actix::prelude::*;

use crate::domain::order::{DeliveryOutcome, OrderEvent, OrderId, OrderStatus, WorkflowAction};
use crate::event_sourcing::EventEnvelope;
use crate::notifications::TracingSink;
use crate::risk::PhoneBlacklist;
use crate::workflow::{self, ConfirmationWorkflow, OrderCard, PanelSubmission, PanelView, WorkflowError};

pub type DeskWorkflow = ConfirmationWorkflow<PhoneBlacklist, TracingSink>;

// ============================================================================
// Actor Messages
// ============================================================================

#[derive(Message)]
#[rtype(result = "Vec<OrderCard>")]
pub struct ListOrders;

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<PanelView, WorkflowError>")]
pub struct OpenPanel {
    pub order_id: OrderId,
    pub action: WorkflowAction,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<OrderStatus, WorkflowError>")]
pub struct SavePanel {
    pub submission: PanelSubmission,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Option<workflow::OpenPanel>")]
pub struct CancelPanel;

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<OrderStatus, WorkflowError>")]
pub struct ResolveOrder {
    pub order_id: OrderId,
    pub outcome: DeliveryOutcome,
    pub reason: Option<String>,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Vec<EventEnvelope<OrderEvent>>")]
pub struct GetHistory {
    pub order_id: OrderId,
}

// ============================================================================
// Workflow Actor - one desk session
// ============================================================================

pub struct WorkflowActor {
    workflow: DeskWorkflow,
}

impl WorkflowActor {
    pub fn new(workflow: DeskWorkflow) -> Self {
        Self { workflow }
    }
}

impl Actor for WorkflowActor {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        tracing::info!(orders = self.workflow.board().len(), "WorkflowActor started");
    }
}

// ============================================================================
// Message Handlers
// ============================================================================

impl Handler<ListOrders> for WorkflowActor {
    type Result = MessageResult<ListOrders>;

    fn handle(&mut self, _msg: ListOrders, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.workflow.board())
    }
}

impl Handler<OpenPanel> for WorkflowActor {
    type Result = Result<PanelView, WorkflowError>;

    fn handle(&mut self, msg: OpenPanel, _: &mut Self::Context) -> Self::Result {
        self.workflow.open_panel(&msg.order_id, msg.action)
    }
}

impl Handler<SavePanel> for WorkflowActor {
    type Result = Result<OrderStatus, WorkflowError>;

    fn handle(&mut self, msg: SavePanel, _: &mut Self::Context) -> Self::Result {
        self.workflow.save(msg.submission)
    }
}

impl Handler<CancelPanel> for WorkflowActor {
    type Result = MessageResult<CancelPanel>;

    fn handle(&mut self, _msg: CancelPanel, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.workflow.cancel())
    }
}

impl Handler<ResolveOrder> for WorkflowActor {
    type Result = Result<OrderStatus, WorkflowError>;

    fn handle(&mut self, msg: ResolveOrder, _: &mut Self::Context) -> Self::Result {
        self.workflow.resolve(&msg.order_id, msg.outcome, msg.reason)
    }
}

impl Handler<GetHistory> for WorkflowActor {
    type Result = MessageResult<GetHistory>;

    fn handle(&mut self, msg: GetHistory, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.workflow.history(&msg.order_id).to_vec())
    }
}
