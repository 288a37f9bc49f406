//! Shared domain types and configuration for the Roof Guard workspace.

pub mod agents;
pub mod app_config;
pub mod chat;
pub mod config;
pub mod estimates;
pub mod listings;
pub mod roofers;

use thiserror::Error;

pub use agents::{AgentCrew, AgentStatus, OutreachAgentTask};
pub use app_config::{AppConfig, Environment};
pub use chat::{ChatMessage, Conversation, LocationState, Role};
pub use config::{load_app_config, load_app_config_from_env, resolve_api_key};
pub use estimates::{EstimateRequest, EstimationResult};
pub use listings::{GeneratedEmail, ListingStrategy, PricingOption};
pub use roofers::{GeoPoint, Roofer};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
