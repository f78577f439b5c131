// ============================================================================
// Confirmation Workflow
// ============================================================================
//
// - guard       - single-flight gate over action panels
// - panels      - action panel selector (call script, checklist, shipping form)
// - controller  - owner of the store, guard and collaborators; commits transitions
// - errors      - WorkflowError
//
// ============================================================================

pub mod guard;
pub mod panels;
pub mod controller;
pub mod errors;

pub use guard::{OpenPanel, PanelBlocked, PanelGuard};
pub use panels::{select_panel, PanelSettings, PanelSubmission, PanelTool, PanelView};
pub use controller::{ConfirmationWorkflow, OrderCard, WorkflowSettings};
pub use errors::WorkflowError;
