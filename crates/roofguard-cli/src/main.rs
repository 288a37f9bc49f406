mod chat;
mod email_html;
mod endpoints;
mod estimate;
mod outreach;
mod strategy;

use clap::{Parser, Subcommand};
use roofguard_core::{EstimateRequest, LocationState};
use roofguard_gemini::RoofGateway;
use roofguard_store::JsonFileStore;
use tracing_subscriber::EnvFilter;

use crate::endpoints::EndpointsCommands;
use crate::strategy::StrategyCommands;

#[derive(Debug, Parser)]
#[command(name = "roofguard")]
#[command(about = "GTA Roof Guard emergency dispatch and partner network assistant")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Emergency dispatch chat (interactive unless --message is given)
    Chat {
        /// Send a single message and exit
        #[arg(long)]
        message: Option<String>,
        /// Latitude of the damaged property
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude of the damaged property
        #[arg(long, allow_negative_numbers = true)]
        lng: Option<f64>,
        #[arg(long)]
        postal_code: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },
    /// Partner sales chat with the growth consultant
    Sales {
        /// Send a single message and exit
        #[arg(long)]
        message: Option<String>,
    },
    /// Draft a partner invitation email with the outreach crew
    Outreach {
        /// Target roofing company
        #[arg(long)]
        company: String,
        #[arg(long)]
        city: String,
        /// Company website, if known
        #[arg(long)]
        website: Option<String>,
        /// Extra instructions for the copywriter
        #[arg(long)]
        instructions: Option<String>,
        /// Print an email-client HTML document instead of plain text
        #[arg(long)]
        html: bool,
    },
    /// Listing strategy and pricing tiers
    Strategy {
        #[command(subcommand)]
        command: StrategyCommands,
    },
    /// Estimate a roofing job and list recommended local companies
    Estimate {
        /// Roof area in square feet
        #[arg(long, default_value = "2000")]
        size: u32,
        #[arg(long, default_value = "Asphalt Shingle")]
        material: String,
        #[arg(long, default_value = "Moderate (Standard Hip/Valley)")]
        complexity: String,
        #[arg(long, default_value = "Toronto")]
        city: String,
    },
    /// Integration endpoints used when partners enroll
    Endpoints {
        #[command(subcommand)]
        command: EndpointsCommands,
    },
    /// Enroll a roofing company as a network partner
    Enroll {
        /// Company name
        #[arg(long)]
        name: String,
        /// Pricing tier from the current listing strategy
        #[arg(long)]
        tier: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = roofguard_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = JsonFileStore::new(&config.store_path);
    let gateway = || RoofGateway::from_config(&config);

    match cli.command {
        Some(Commands::Chat {
            message,
            lat,
            lng,
            postal_code,
            city,
        }) => {
            let location = LocationState {
                lat,
                lng,
                postal_code,
                city,
            };
            chat::run_dispatch_chat(&gateway()?, message.as_deref(), &location).await?;
        }
        Some(Commands::Sales { message }) => {
            chat::run_sales_chat(&gateway()?, message.as_deref()).await?;
        }
        Some(Commands::Outreach {
            company,
            city,
            website,
            instructions,
            html,
        }) => {
            outreach::run_outreach(
                &gateway()?,
                &company,
                &city,
                website.as_deref(),
                instructions.as_deref(),
                html,
            )
            .await?;
        }
        Some(Commands::Strategy { command }) => match command {
            StrategyCommands::Generate { context } => {
                strategy::run_strategy_generate(&gateway()?, &store, &context).await?;
            }
            StrategyCommands::Show => strategy::run_strategy_show(&store),
        },
        Some(Commands::Estimate {
            size,
            material,
            complexity,
            city,
        }) => {
            let request = EstimateRequest {
                size_sq_ft: size,
                material,
                complexity,
                city,
            };
            estimate::run_estimate(&gateway()?, &request).await?;
        }
        Some(Commands::Endpoints { command }) => endpoints::run_endpoints(&store, command)?,
        Some(Commands::Enroll { name, tier }) => {
            endpoints::run_enroll(&store, &name, &tier).await?;
        }
        None => println!("roofguard ready; run `roofguard --help` for commands"),
    }

    Ok(())
}
