use std::sync::Arc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::order::lifecycle;
use crate::domain::order::{
    DeliveryOutcome, NewOrder, OrderAggregate, OrderCommand, OrderCommandHandler, OrderEvent,
    OrderId, OrderStatus, OrderStore, PhoneNumber, Step, WorkflowAction,
};
use crate::event_sourcing::EventEnvelope;
use crate::metrics::Metrics;
use crate::notifications::{Notice, NotificationSink};
use crate::risk::{annotate_with_threshold, BlacklistProvider, RiskHints, HIGH_VALUE_THRESHOLD};

use super::errors::WorkflowError;
use super::guard::{OpenPanel, PanelBlocked, PanelGuard};
use super::panels::{select_panel, PanelSettings, PanelSubmission, PanelView};

// ============================================================================
// Workflow Controller
// ============================================================================
//
// Owns every piece of mutable state of a desk session. UI layers get a
// reference to it; nothing is global.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSettings {
    pub high_value_threshold: u64,
    pub panels: PanelSettings,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            high_value_threshold: HIGH_VALUE_THRESHOLD,
            panels: PanelSettings::default(),
        }
    }
}

/// One row of the order board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCard {
    pub id: OrderId,
    pub customer: String,
    pub phone: PhoneNumber,
    pub value: u64,
    pub wilaya: Option<String>,
    pub status: OrderStatus,
    pub hints: RiskHints,
    pub offered: Vec<Step>,
    pub panel_open: bool,
}

pub struct ConfirmationWorkflow<B, N> {
    commands: OrderCommandHandler,
    guard: PanelGuard,
    blacklist: B,
    notifier: N,
    settings: WorkflowSettings,
    metrics: Option<Arc<Metrics>>,
}

impl<B, N> ConfirmationWorkflow<B, N>
where
    B: BlacklistProvider,
    N: NotificationSink,
{
    pub fn new(blacklist: B, notifier: N, settings: WorkflowSettings) -> Self {
        Self {
            commands: OrderCommandHandler::new(OrderStore::new()),
            guard: PanelGuard::new(),
            blacklist,
            notifier,
            settings,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn place(&mut self, order: NewOrder) -> Result<(), WorkflowError> {
        let order_id = order.id.clone();
        self.commands
            .handle(&order_id, OrderCommand::PlaceOrder(order), Uuid::new_v4())?;
        Ok(())
    }

    pub fn order(&self, order_id: &OrderId) -> Option<&OrderAggregate> {
        self.commands.store().get(order_id)
    }

    pub fn history(&self, order_id: &OrderId) -> &[EventEnvelope<OrderEvent>] {
        self.commands.store().history(order_id)
    }

    pub fn active_panel(&self) -> Option<&OpenPanel> {
        self.guard.current()
    }

    pub fn annotate(&self, order_id: &OrderId) -> Result<RiskHints, WorkflowError> {
        let order = self.require(order_id)?;
        Ok(self.hints_for(order))
    }

    /// Steps offered for the order; empty once it is delivered or returned
    pub fn offered_steps(&self, order_id: &OrderId) -> Result<Vec<Step>, WorkflowError> {
        let order = self.require(order_id)?;
        Ok(lifecycle::offered_steps(order.status))
    }

    /// Every order with its badges and controls, in board order
    pub fn board(&self) -> Vec<OrderCard> {
        let open = self.guard.current();

        self.commands
            .store()
            .iter()
            .map(|order| OrderCard {
                id: order.id.clone(),
                customer: order.customer.clone(),
                phone: order.phone.clone(),
                value: order.value,
                wilaya: order.wilaya.clone(),
                status: order.status,
                hints: self.hints_for(order),
                offered: lifecycle::offered_steps(order.status),
                panel_open: open.is_some_and(|p| p.order_id == order.id),
            })
            .collect()
    }

    /// Open the panel for `action` on an order.
    ///
    /// While another panel is open the request is dropped and an
    /// "Action Blocked" warning is sent to the notifier.
    pub fn open_panel(&mut self, order_id: &OrderId, action: WorkflowAction) -> Result<PanelView, WorkflowError> {
        if let Some(open) = self.guard.current() {
            return Err(self.reject(PanelBlocked { open: open.clone() }));
        }

        let order = self.require(order_id)?;
        let view = select_panel(order, action, self.hints_for(order), &self.settings.panels)?;

        self.guard.request_open(order_id, action)?;

        if let Some(metrics) = &self.metrics {
            metrics.record_panel_opened(action.as_str());
        }
        tracing::info!(
            order_id = %order_id,
            action = %action,
            high_value = view.hints.high_value,
            blacklisted = view.hints.blacklisted,
            "Action panel opened"
        );

        Ok(view)
    }

    /// Commit the open panel's transition, then close it.
    ///
    /// If the commit fails the panel stays open so it can be cancelled.
    pub fn save(&mut self, submission: PanelSubmission) -> Result<OrderStatus, WorkflowError> {
        let open = self.guard.current().cloned().ok_or(WorkflowError::NoOpenPanel)?;

        if submission.action() != open.action {
            return Err(WorkflowError::SubmissionMismatch {
                open: open.action,
                submitted: submission.action(),
            });
        }

        let status = self.commit(&open.order_id, submission.into_command())?;
        self.guard.close();

        if let Some(metrics) = &self.metrics {
            metrics.record_panel_closed(open.action.as_str(), true);
        }

        Ok(status)
    }

    /// Close the open panel without committing anything
    pub fn cancel(&mut self) -> Option<OpenPanel> {
        let closed = self.guard.close();

        if let Some(panel) = &closed {
            if let Some(metrics) = &self.metrics {
                metrics.record_panel_closed(panel.action.as_str(), false);
            }
            tracing::info!(order_id = %panel.order_id, action = %panel.action, "Action panel cancelled");
        }

        closed
    }

    /// Mark a shipped order delivered or returned. No panel is involved.
    pub fn resolve(
        &mut self,
        order_id: &OrderId,
        outcome: DeliveryOutcome,
        reason: Option<String>,
    ) -> Result<OrderStatus, WorkflowError> {
        let command = match outcome {
            DeliveryOutcome::Delivered => OrderCommand::MarkDelivered,
            DeliveryOutcome::Returned => OrderCommand::MarkReturned { reason },
        };

        self.commit(order_id, command)
    }

    fn commit(&mut self, order_id: &OrderId, command: OrderCommand) -> Result<OrderStatus, WorkflowError> {
        let from = self.require(order_id)?.status;

        self.commands.handle(order_id, command, Uuid::new_v4())?;

        let to = self.require(order_id)?.status;
        if let Some(metrics) = &self.metrics {
            metrics.record_transition(from.as_str(), to.as_str());
        }

        Ok(to)
    }

    fn reject(&self, blocked: PanelBlocked) -> WorkflowError {
        tracing::warn!(
            open_order = %blocked.open.order_id,
            open_action = %blocked.open.action,
            "Panel request blocked"
        );
        self.notifier.notify(Notice::warning("Action Blocked", blocked.to_string()));
        if let Some(metrics) = &self.metrics {
            metrics.record_blocked();
        }

        WorkflowError::Blocked(blocked)
    }

    fn require(&self, order_id: &OrderId) -> Result<&OrderAggregate, WorkflowError> {
        self.commands
            .store()
            .get(order_id)
            .ok_or_else(|| WorkflowError::OrderNotFound(order_id.clone()))
    }

    fn hints_for(&self, order: &OrderAggregate) -> RiskHints {
        annotate_with_threshold(order, &self.blacklist, self.settings.high_value_threshold)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{OrderError, ShippingDetails};
    use crate::notifications::MemorySink;
    use crate::risk::PhoneBlacklist;
    use crate::workflow::PanelTool;

    type TestWorkflow = ConfirmationWorkflow<PhoneBlacklist, Arc<MemorySink>>;

    fn new_order(id: &str, phone: &str, value: u64, status: OrderStatus) -> NewOrder {
        NewOrder {
            id: OrderId::new(id),
            customer: format!("Client {}", id),
            phone: PhoneNumber::new(phone),
            value,
            wilaya: Some("Alger".to_string()),
            status,
        }
    }

    fn workflow(orders: Vec<NewOrder>) -> (TestWorkflow, Arc<MemorySink>, Arc<Metrics>) {
        let sink = Arc::new(MemorySink::new());
        let metrics = Arc::new(Metrics::new().unwrap());
        let mut workflow = ConfirmationWorkflow::new(
            PhoneBlacklist::new(["0555123456"]),
            sink.clone(),
            WorkflowSettings::default(),
        )
        .with_metrics(metrics.clone());

        for order in orders {
            workflow.place(order).unwrap();
        }
        (workflow, sink, metrics)
    }

    fn shipment() -> ShippingDetails {
        ShippingDetails {
            wilaya: "Constantine".to_string(),
            address: "Cité 500 logements, bloc B".to_string(),
            carrier: "ZR Express".to_string(),
            tracking_number: None,
        }
    }

    #[test]
    fn test_annotate_blacklisted_pre_order() {
        let (workflow, _, _) = workflow(vec![new_order("A", "0555123456", 3500, OrderStatus::PreOrder)]);

        let hints = workflow.annotate(&OrderId::new("A")).unwrap();
        assert_eq!(hints, RiskHints { high_value: false, blacklisted: true });
    }

    #[test]
    fn test_second_panel_is_blocked() {
        let (mut workflow, sink, metrics) = workflow(vec![
            new_order("A", "0661000001", 3500, OrderStatus::PreOrder),
            new_order("B", "0661000002", 4500, OrderStatus::Confirmed),
        ]);
        let a = OrderId::new("A");
        let b = OrderId::new("B");

        workflow.open_panel(&a, WorkflowAction::Confirm).unwrap();
        let err = workflow.open_panel(&b, WorkflowAction::Pack).unwrap_err();

        assert!(err.is_blocked());
        assert_eq!(
            workflow.active_panel(),
            Some(&OpenPanel { order_id: a.clone(), action: WorkflowAction::Confirm })
        );
        assert_eq!(workflow.order(&b).unwrap().status, OrderStatus::Confirmed);
        assert_eq!(workflow.history(&b).len(), 1);

        let notices = sink.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Action Blocked");
        assert_eq!(metrics.blocked_requests_total.get(), 1);
    }

    #[test]
    fn test_blocked_even_for_invalid_request() {
        let (mut workflow, sink, _) = workflow(vec![
            new_order("A", "0661000001", 3500, OrderStatus::PreOrder),
        ]);
        let a = OrderId::new("A");

        workflow.open_panel(&a, WorkflowAction::Confirm).unwrap();
        let err = workflow.open_panel(&OrderId::new("missing"), WorkflowAction::Ship).unwrap_err();

        assert!(err.is_blocked());
        assert_eq!(sink.notices().len(), 1);
    }

    #[test]
    fn test_pack_and_save() {
        let (mut workflow, _, metrics) = workflow(vec![new_order("C", "0661000003", 6000, OrderStatus::Confirmed)]);
        let c = OrderId::new("C");

        let view = workflow.open_panel(&c, WorkflowAction::Pack).unwrap();
        assert!(matches!(view.tool, PanelTool::PackingChecklist { .. }));
        assert_eq!(view.commits_to, OrderStatus::Packed);

        let status = workflow
            .save(PanelSubmission::Packing { checked_items: vec!["Emballage protégé et scellé".to_string()] })
            .unwrap();

        assert_eq!(status, OrderStatus::Packed);
        assert_eq!(workflow.order(&c).unwrap().status, OrderStatus::Packed);
        assert!(workflow.active_panel().is_none());
        assert_eq!(metrics.transitions_total.with_label_values(&["confirmed", "packed"]).get(), 1);
        assert_eq!(metrics.open_panels.get(), 0);

        // Guard is free again
        assert!(workflow.open_panel(&c, WorkflowAction::Ship).is_ok());
    }

    #[test]
    fn test_direct_return_closes_the_order() {
        let (mut workflow, _, _) = workflow(vec![new_order("D", "0661000004", 5200, OrderStatus::Shipped)]);
        let d = OrderId::new("D");

        let status = workflow
            .resolve(&d, DeliveryOutcome::Returned, Some("Client injoignable".to_string()))
            .unwrap();

        assert_eq!(status, OrderStatus::Returned);
        assert!(workflow.offered_steps(&d).unwrap().is_empty());
        assert_eq!(workflow.order(&d).unwrap().return_reason.as_deref(), Some("Client injoignable"));

        let err = workflow.resolve(&d, DeliveryOutcome::Delivered, None).unwrap_err();
        assert!(matches!(err, WorkflowError::Order(OrderError::Terminal(OrderStatus::Returned))));
        for action in [WorkflowAction::Confirm, WorkflowAction::Pack, WorkflowAction::Ship] {
            assert!(workflow.open_panel(&d, action).is_err());
        }
        assert!(workflow.active_panel().is_none());
    }

    #[test]
    fn test_cancel_ship_panel_keeps_status() {
        let (mut workflow, _, metrics) = workflow(vec![new_order("E", "0661000005", 7000, OrderStatus::Packed)]);
        let e = OrderId::new("E");

        workflow.open_panel(&e, WorkflowAction::Ship).unwrap();
        let closed = workflow.cancel().unwrap();

        assert_eq!(closed.order_id, e);
        assert_eq!(workflow.order(&e).unwrap().status, OrderStatus::Packed);
        assert!(workflow.active_panel().is_none());
        assert_eq!(workflow.history(&e).len(), 1);
        assert_eq!(metrics.panels_cancelled_total.with_label_values(&["ship"]).get(), 1);
    }

    #[test]
    fn test_cancel_without_panel_is_noop() {
        let (mut workflow, _, _) = workflow(vec![]);
        assert!(workflow.cancel().is_none());
        assert!(workflow.active_panel().is_none());
    }

    #[test]
    fn test_open_panel_with_wrong_precondition_leaves_guard_free() {
        let (mut workflow, sink, _) = workflow(vec![new_order("F", "0661000006", 2000, OrderStatus::PreOrder)]);
        let f = OrderId::new("F");

        let err = workflow.open_panel(&f, WorkflowAction::Ship).unwrap_err();
        assert!(matches!(err, WorkflowError::Order(OrderError::InvalidTransition { .. })));
        assert!(workflow.active_panel().is_none());
        assert!(sink.notices().is_empty());

        let err = workflow.open_panel(&OrderId::new("nope"), WorkflowAction::Confirm).unwrap_err();
        assert!(matches!(err, WorkflowError::OrderNotFound(_)));
    }

    #[test]
    fn test_save_without_panel() {
        let (mut workflow, _, _) = workflow(vec![]);
        let err = workflow.save(PanelSubmission::Call { notes: None }).unwrap_err();
        assert!(matches!(err, WorkflowError::NoOpenPanel));
    }

    #[test]
    fn test_save_with_mismatched_submission_keeps_panel_open() {
        let (mut workflow, _, _) = workflow(vec![new_order("G", "0661000007", 2000, OrderStatus::Packed)]);
        let g = OrderId::new("G");

        workflow.open_panel(&g, WorkflowAction::Ship).unwrap();
        let err = workflow.save(PanelSubmission::Call { notes: None }).unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::SubmissionMismatch { open: WorkflowAction::Ship, submitted: WorkflowAction::Confirm }
        ));
        assert!(workflow.active_panel().is_some());

        let status = workflow.save(PanelSubmission::Shipping(shipment())).unwrap();
        assert_eq!(status, OrderStatus::Shipped);
        let order = workflow.order(&g).unwrap();
        assert_eq!(order.wilaya.as_deref(), Some("Constantine"));
        assert_eq!(order.shipment.as_ref().unwrap().carrier, "ZR Express");
    }

    #[test]
    fn test_resolve_ignores_open_panel_on_other_order() {
        let (mut workflow, sink, metrics) = workflow(vec![
            new_order("A", "0661000001", 3500, OrderStatus::PreOrder),
            new_order("B", "0661000002", 4800, OrderStatus::Shipped),
        ]);
        let a = OrderId::new("A");
        let b = OrderId::new("B");

        workflow.open_panel(&a, WorkflowAction::Confirm).unwrap();
        let status = workflow.resolve(&b, DeliveryOutcome::Delivered, None).unwrap();

        assert_eq!(status, OrderStatus::Delivered);
        assert_eq!(workflow.order(&b).unwrap().status, OrderStatus::Delivered);
        assert_eq!(
            workflow.active_panel(),
            Some(&OpenPanel { order_id: a.clone(), action: WorkflowAction::Confirm })
        );
        assert_eq!(workflow.order(&a).unwrap().status, OrderStatus::PreOrder);
        assert!(sink.notices().is_empty());
        assert_eq!(metrics.open_panels.get(), 1);
    }

    #[test]
    fn test_full_lifecycle_to_delivered() {
        let (mut workflow, _, _) = workflow(vec![new_order("H", "0661000008", 9500, OrderStatus::PreOrder)]);
        let h = OrderId::new("H");

        let view = workflow.open_panel(&h, WorkflowAction::Confirm).unwrap();
        assert!(view.hints.high_value);
        workflow.save(PanelSubmission::Call { notes: Some("OK".to_string()) }).unwrap();

        workflow.open_panel(&h, WorkflowAction::Pack).unwrap();
        workflow.save(PanelSubmission::Packing { checked_items: vec![] }).unwrap();

        workflow.open_panel(&h, WorkflowAction::Ship).unwrap();
        workflow.save(PanelSubmission::Shipping(shipment())).unwrap();

        assert_eq!(
            workflow.offered_steps(&h).unwrap(),
            vec![Step::Direct(DeliveryOutcome::Delivered), Step::Direct(DeliveryOutcome::Returned)]
        );
        let status = workflow.resolve(&h, DeliveryOutcome::Delivered, None).unwrap();

        assert_eq!(status, OrderStatus::Delivered);
        assert_eq!(workflow.history(&h).len(), 5);
        assert_eq!(workflow.order(&h).unwrap().call_notes.as_deref(), Some("OK"));
    }

    #[test]
    fn test_board_reflects_state() {
        let (mut workflow, _, _) = workflow(vec![
            new_order("A", "+213 555 12 34 56", 3500, OrderStatus::PreOrder),
            new_order("B", "0661000002", 15000, OrderStatus::Delivered),
        ]);
        workflow.open_panel(&OrderId::new("A"), WorkflowAction::Confirm).unwrap();

        let board = workflow.board();
        assert_eq!(board.len(), 2);

        assert!(board[0].panel_open);
        assert!(board[0].hints.blacklisted);
        assert_eq!(board[0].offered, vec![Step::Panel(WorkflowAction::Confirm)]);

        assert!(!board[1].panel_open);
        assert!(board[1].hints.high_value);
        assert!(board[1].offered.is_empty());

        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json[0]["status"], "pre-order");
    }

    #[test]
    fn test_duplicate_placement_rejected() {
        let (mut workflow, _, _) = workflow(vec![new_order("A", "0661000001", 100, OrderStatus::PreOrder)]);
        let err = workflow
            .place(new_order("A", "0661000001", 100, OrderStatus::PreOrder))
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Order(OrderError::AlreadyPlaced(_))));
    }
}
