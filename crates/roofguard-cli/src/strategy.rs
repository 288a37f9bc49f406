//! Strategy lab: generate, cache and display the listing strategy.

use std::time::Duration;

use clap::Subcommand;
use roofguard_core::{AgentCrew, AgentStatus, ListingStrategy};
use roofguard_gemini::RoofGateway;
use roofguard_store::{load_strategy, save_strategy, KeyValueStore};

use crate::outreach::print_crew;

const DEPLOY_PHASE: Duration = Duration::from_millis(1500);

/// Sub-commands available under `strategy`.
#[derive(Debug, Subcommand)]
pub enum StrategyCommands {
    /// Generate a new strategy from market context and cache it
    Generate {
        /// Market context for the strategy crew (competitors, season, goals)
        #[arg(long)]
        context: String,
    },
    /// Show the cached strategy, or the built-in default
    Show,
}

/// Run the strategy crew and persist the generated strategy.
///
/// # Errors
///
/// Returns an error if generation fails or the strategy cannot be stored.
/// The previously cached strategy is left untouched on failure.
pub(crate) async fn run_strategy_generate(
    gateway: &RoofGateway,
    store: &dyn KeyValueStore,
    context: &str,
) -> anyhow::Result<()> {
    let mut crew = AgentCrew::strategy();
    crew.update_all(AgentStatus::Working, "Processing market context...");
    print_crew(&crew);

    let result = async {
        let strategy = gateway.generate_network_strategy(context).await?;
        save_strategy(store, &strategy)?;
        anyhow::Ok(strategy)
    }
    .await;

    let strategy = match result {
        Ok(strategy) => strategy,
        Err(e) => {
            crew.update_all(AgentStatus::Error, "Failed to synthesize strategy.");
            print_crew(&crew);
            return Err(e.context("strategy crew failed"));
        }
    };

    tokio::time::sleep(DEPLOY_PHASE).await;
    crew.update_all(AgentStatus::Completed, "Task complete. Blueprint deployed.");
    print_crew(&crew);

    println!("{}", render_strategy(&strategy));
    Ok(())
}

/// Print the cached strategy. Never fails; falls back to the default.
pub(crate) fn run_strategy_show(store: &dyn KeyValueStore) {
    println!("{}", render_strategy(&load_strategy(store)));
}

pub(crate) fn render_strategy(strategy: &ListingStrategy) -> String {
    let mut out = format!("\n{}\n\nStrategy\n", strategy.marketing_copy);
    for point in strategy.strategy_points() {
        out.push_str("  ");
        out.push_str(point);
        out.push('\n');
    }

    out.push_str("\nPricing\n");
    for option in &strategy.pricing_options {
        out.push_str(&format!("  {:<16}{} / month\n", option.tier, option.price));
        for feature in &option.features {
            out.push_str(&format!("    - {feature}\n"));
        }
    }
    out
}
