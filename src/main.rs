use actix::prelude::*;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use confirmation_desk::actors::{
    CancelPanel, DeskWorkflow, GetHistory, ListOrders, OpenPanel, ResolveOrder, SavePanel,
    WorkflowActor,
};
use confirmation_desk::domain::order::{DeliveryOutcome, OrderId, ShippingDetails, WorkflowAction};
use confirmation_desk::notifications::TracingSink;
use confirmation_desk::risk::PhoneBlacklist;
use confirmation_desk::workflow::PanelSubmission;
use confirmation_desk::config::{load_config, CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE};
use confirmation_desk::{event_sourcing, fixtures, metrics};

#[actix::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var(CONFIG_PATH_ENV)
        .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    let desk_config = load_config(&config_path)?;

    // RUST_LOG wins over the configured filter
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&desk_config.logging.filter)),
        )
        .init();

    tracing::info!("🚀 Starting order confirmation desk");
    tracing::info!(
        high_value_threshold = desk_config.risk.high_value_threshold,
        carriers = desk_config.panels.carriers.len(),
        "Configuration loaded"
    );

    // === 1. Metrics registry ===
    let metrics = Arc::new(metrics::Metrics::new()?);

    // === 2. Blacklist: configured numbers, or the demo list ===
    let blacklist = if desk_config.risk.blacklist.is_empty() {
        PhoneBlacklist::new(fixtures::seed_blacklist())
    } else {
        PhoneBlacklist::new(&desk_config.risk.blacklist)
    };
    tracing::info!(numbers = blacklist.len(), "Blacklist ready");

    // === 3. Workflow controller with the seeded orders ===
    let mut desk = DeskWorkflow::new(blacklist, TracingSink, desk_config.workflow_settings())
        .with_metrics(metrics.clone());
    for order in fixtures::seed_orders() {
        desk.place(order)?;
    }

    let desk = WorkflowActor::new(desk).start();

    // === 4. Walk the lifecycle ===
    let first = OrderId::new("CMD-1001");
    let view = desk
        .send(OpenPanel { order_id: first.clone(), action: WorkflowAction::Confirm })
        .await??;
    tracing::info!(
        order_id = %view.order_id,
        blacklisted = view.hints.blacklisted,
        high_value = view.hints.high_value,
        "📞 Call script ready"
    );

    // A second panel while the call is in progress is refused
    match desk
        .send(OpenPanel { order_id: OrderId::new("CMD-1003"), action: WorkflowAction::Pack })
        .await?
    {
        Err(err) if err.is_blocked() => tracing::info!("Second panel refused while the call is open"),
        Err(err) => return Err(err.into()),
        Ok(_) => anyhow::bail!("single-flight guard let a second panel open"),
    }

    let status = desk
        .send(SavePanel {
            submission: PanelSubmission::Call {
                notes: Some("Client disponible le matin".to_string()),
            },
        })
        .await??;
    tracing::info!(order_id = %first, status = %status, "✅ Call saved");

    let packing = OrderId::new("CMD-1003");
    desk.send(OpenPanel { order_id: packing.clone(), action: WorkflowAction::Pack })
        .await??;
    let status = desk
        .send(SavePanel {
            submission: PanelSubmission::Packing {
                checked_items: desk_config.panels.packing_checklist.clone(),
            },
        })
        .await??;
    tracing::info!(order_id = %packing, status = %status, "📦 Parcel packed");

    let shipping = OrderId::new("CMD-1004");
    desk.send(OpenPanel { order_id: shipping.clone(), action: WorkflowAction::Ship })
        .await??;
    desk.send(CancelPanel).await?;
    desk.send(OpenPanel { order_id: shipping.clone(), action: WorkflowAction::Ship })
        .await??;
    let status = desk
        .send(SavePanel {
            submission: PanelSubmission::Shipping(ShippingDetails {
                wilaya: "Sétif".to_string(),
                address: "Cité 1014 logements, bâtiment 12".to_string(),
                carrier: "Yalidine".to_string(),
                tracking_number: Some("YAL-55102".to_string()),
            }),
        })
        .await??;
    tracing::info!(order_id = %shipping, status = %status, "🚚 Parcel shipped");

    desk.send(ResolveOrder {
        order_id: OrderId::new("CMD-1005"),
        outcome: DeliveryOutcome::Delivered,
        reason: None,
    })
    .await??;
    desk.send(ResolveOrder {
        order_id: OrderId::new("CMD-1006"),
        outcome: DeliveryOutcome::Returned,
        reason: Some("Colis refusé à la livraison".to_string()),
    })
    .await??;

    // === 5. Report ===
    let board = desk.send(ListOrders).await?;
    println!("{}", serde_json::to_string_pretty(&board)?);

    for envelope in desk.send(GetHistory { order_id: first }).await? {
        println!("{}", event_sourcing::serialize_event(&envelope)?);
    }

    println!("{}", metrics.render()?);

    tracing::info!("🎉 Desk session complete");

    Ok(())
}
