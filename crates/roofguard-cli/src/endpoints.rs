//! Integration endpoints and partner enrollment.

use std::time::Duration;

use anyhow::bail;
use clap::Subcommand;
use roofguard_store::{load_strategy, IntegrationEndpoints, KeyValueStore};

const VETTING_PHASE: Duration = Duration::from_millis(2000);

/// Sub-commands available under `endpoints`.
#[derive(Debug, Subcommand)]
pub enum EndpointsCommands {
    /// Show the configured endpoints
    Show,
    /// Set endpoints; an omitted flag clears that endpoint
    Set {
        /// Google Sheets link partner data is exported to
        #[arg(long)]
        sheet: Option<String>,
        /// Webhook triggered when a partner enrolls
        #[arg(long)]
        webhook: Option<String>,
    },
    /// Remove both endpoints
    Clear,
}

/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub(crate) fn run_endpoints(
    store: &dyn KeyValueStore,
    command: EndpointsCommands,
) -> anyhow::Result<()> {
    match command {
        EndpointsCommands::Show => {}
        EndpointsCommands::Set { sheet, webhook } => {
            IntegrationEndpoints {
                sheet_link: sheet,
                webhook_url: webhook,
            }
            .save(store)?;
            println!("Integration endpoints secured. System sync active.");
        }
        EndpointsCommands::Clear => {
            IntegrationEndpoints::default().save(store)?;
            println!("Integration endpoints cleared.");
        }
    }
    println!("{}", render_endpoints(&IntegrationEndpoints::load(store)?));
    Ok(())
}

/// Enroll `name` on pricing tier `tier` of the current strategy.
///
/// # Errors
///
/// Returns an error if `tier` is not offered by the current strategy or
/// the endpoints cannot be read.
pub(crate) async fn run_enroll(
    store: &dyn KeyValueStore,
    name: &str,
    tier: &str,
) -> anyhow::Result<()> {
    let strategy = load_strategy(store);
    let Some(option) = strategy
        .pricing_options
        .iter()
        .find(|o| o.tier.eq_ignore_ascii_case(tier.trim()))
    else {
        let offered: Vec<&str> = strategy
            .pricing_options
            .iter()
            .map(|o| o.tier.as_str())
            .collect();
        bail!("unknown tier {tier:?}; offered tiers: {}", offered.join(", "));
    };

    println!("Vetting {name}...");
    tokio::time::sleep(VETTING_PHASE).await;

    let endpoints = IntegrationEndpoints::load(store)?;
    if let Some(sheet) = &endpoints.sheet_link {
        tracing::info!(partner = name, sheet = %sheet, "exporting partner to sheet");
    }
    if let Some(webhook) = &endpoints.webhook_url {
        tracing::info!(partner = name, webhook = %webhook, "triggering enrollment webhook");
    }

    println!("{}", render_enrollment(name, &option.tier, &endpoints));
    Ok(())
}

pub(crate) fn render_endpoints(endpoints: &IntegrationEndpoints) -> String {
    format!(
        "sheet:   {}\nwebhook: {}",
        endpoints.sheet_link.as_deref().unwrap_or("(not set)"),
        endpoints.webhook_url.as_deref().unwrap_or("(not set)")
    )
}

pub(crate) fn render_enrollment(name: &str, tier: &str, endpoints: &IntegrationEndpoints) -> String {
    let sync = if endpoints.sheet_link.is_some() {
        "Pushed to Google Sheets"
    } else {
        "Local Only"
    };
    format!(
        "Success! Vetting Protocol Complete for {name}.\n\nAI Status: Verified\nTier: {tier}\nData Sync: {sync}"
    )
}
