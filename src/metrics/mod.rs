use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

// ============================================================================
// Metrics Module - Prometheus metrics for the confirmation desk
// ============================================================================
//
// Provides metrics for:
// - Order status transitions (labelled from/to)
// - Action panels opened and cancelled (labelled by action)
// - Requests rejected by the single-flight guard
//
// ============================================================================

pub struct Metrics {
    registry: Registry,

    pub transitions_total: IntCounterVec,
    pub panels_opened_total: IntCounterVec,
    pub panels_cancelled_total: IntCounterVec,
    pub blocked_requests_total: IntCounter,
    pub open_panels: IntGauge,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let transitions_total = IntCounterVec::new(
            Opts::new("order_transitions_total", "Order status transitions committed"),
            &["from", "to"],
        )?;
        registry.register(Box::new(transitions_total.clone()))?;

        let panels_opened_total = IntCounterVec::new(
            Opts::new("action_panels_opened_total", "Action panels opened"),
            &["action"],
        )?;
        registry.register(Box::new(panels_opened_total.clone()))?;

        let panels_cancelled_total = IntCounterVec::new(
            Opts::new("action_panels_cancelled_total", "Action panels closed without saving"),
            &["action"],
        )?;
        registry.register(Box::new(panels_cancelled_total.clone()))?;

        let blocked_requests_total = IntCounter::new(
            "action_blocked_total",
            "Panel requests rejected because another panel was open",
        )?;
        registry.register(Box::new(blocked_requests_total.clone()))?;

        let open_panels = IntGauge::new("action_panels_open", "Action panels currently open (0 or 1)")?;
        registry.register(Box::new(open_panels.clone()))?;

        Ok(Self {
            registry,
            transitions_total,
            panels_opened_total,
            panels_cancelled_total,
            blocked_requests_total,
            open_panels,
        })
    }

    pub fn record_transition(&self, from: &str, to: &str) {
        self.transitions_total.with_label_values(&[from, to]).inc();
    }

    pub fn record_panel_opened(&self, action: &str) {
        self.panels_opened_total.with_label_values(&[action]).inc();
        self.open_panels.set(1);
    }

    /// `saved` is false when the operator cancelled
    pub fn record_panel_closed(&self, action: &str, saved: bool) {
        if !saved {
            self.panels_cancelled_total.with_label_values(&[action]).inc();
        }
        self.open_panels.set(0);
    }

    pub fn record_blocked(&self) {
        self.blocked_requests_total.inc();
    }

    /// Text exposition format
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
