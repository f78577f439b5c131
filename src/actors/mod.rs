// ============================================================================
// Actors Module
// ============================================================================
//
// The workflow controller is hosted in a single actor so every operator
// request is handled one at a time, in arrival order.
//
// ============================================================================

mod workflow_actor;

pub use workflow_actor::{
    CancelPanel, DeskWorkflow, GetHistory, ListOrders, OpenPanel, ResolveOrder, SavePanel,
    WorkflowActor,
};
