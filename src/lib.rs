// ============================================================================
// Order Confirmation Desk
// ============================================================================
//
// Back-office workflow for cash-on-delivery orders:
//   pre-order -> confirmed -> packed -> shipped -> delivered | returned
//
// Layers:
// - event_sourcing - generic aggregate trait, event envelope, in-memory log
// - domain         - order aggregate, lifecycle table, store, command handler
// - risk           - advisory badges (high value, blacklisted phone)
// - workflow       - single-flight guard, panel selector, controller
// - actors         - actix host for a desk session
//
// ============================================================================

pub mod actors;
pub mod config;
pub mod domain;
pub mod event_sourcing;
pub mod fixtures;
pub mod metrics;
pub mod notifications;
pub mod risk;
pub mod workflow;
