//! The five Roof Guard assistant calls.
//!
//! Each method builds its payload with [`crate::prompts`], sends exactly one
//! request, and normalizes the answer with [`crate::normalize`]. Nothing is
//! cached between calls.

use roofguard_core::{
    AppConfig, ChatMessage, EstimateRequest, EstimationResult, GeneratedEmail, ListingStrategy,
    LocationState, Roofer,
};

use crate::client::GeminiClient;
use crate::error::GatewayError;
use crate::normalize::{
    parse_estimate, parse_generated_email, parse_listing_strategy, roofers_from_grounding,
    DISPATCH_PLACEHOLDER_NAME, ESTIMATE_PLACEHOLDER_NAME,
};
use crate::prompts;
use crate::types::{GenerateContentRequest, GenerateContentResponse};

/// Shown when the dispatch model answers with no text.
pub const DISPATCH_EMPTY_REPLY: &str = "Dispatch processing...";
/// Shown when the sales model answers with no text.
pub const SALES_EMPTY_REPLY: &str =
    "Our growth team is currently scaling operations. Join the waitlist.";

/// Dispatch chat answer: display text plus the roofers grounded for it.
#[derive(Debug, Clone, PartialEq)]
pub struct EmergencyReply {
    pub text: String,
    pub roofers: Vec<Roofer>,
}

/// Stateless adapter over [`GeminiClient`] for the Roof Guard assistants.
#[derive(Debug)]
pub struct RoofGateway {
    client: GeminiClient,
    grounded_model: String,
    text_model: String,
}

impl RoofGateway {
    /// `grounded_model` serves the map-grounded calls (dispatch chat and
    /// estimates); `text_model` serves the rest.
    #[must_use]
    pub fn new(client: GeminiClient, grounded_model: &str, text_model: &str) -> Self {
        Self {
            client,
            grounded_model: grounded_model.to_string(),
            text_model: text_model.to_string(),
        }
    }

    /// Builds a gateway from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the HTTP client cannot be built, or
    /// [`GatewayError::InvalidBaseUrl`] if the configured base URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, GatewayError> {
        let client = GeminiClient::with_base_url(
            config.api_key.as_deref(),
            config.request_timeout_secs,
            &config.user_agent,
            &config.api_base_url,
        )?;
        Ok(Self::new(client, &config.grounded_model, &config.text_model))
    }

    /// Sends a dispatch chat turn.
    ///
    /// `history` is the transcript before `message`; its system turns are
    /// dropped. The location bias is sent only when both coordinates are
    /// known.
    ///
    /// # Errors
    ///
    /// Returns a provider error ([`GatewayError::kind`] is `Provider`) when
    /// the call cannot complete, or [`GatewayError::MalformedResponse`] if
    /// the response body is not a `generateContent` response.
    pub async fn send_emergency_message(
        &self,
        message: &str,
        history: &[ChatMessage],
        location: Option<&LocationState>,
    ) -> Result<EmergencyReply, GatewayError> {
        let request = prompts::emergency_request(message, history, location);
        let response = self
            .call("emergency dispatch", &self.grounded_model, &request)
            .await?;

        let roofers = roofers_from_grounding(response.grounding_chunks(), DISPATCH_PLACEHOLDER_NAME);
        tracing::info!(
            chunks = response.grounding_chunks().len(),
            roofers = roofers.len(),
            "dispatch reply received"
        );

        Ok(EmergencyReply {
            text: text_or(&response, DISPATCH_EMPTY_REPLY),
            roofers,
        })
    }

    /// Sends a partner sales chat turn and returns the reply text.
    ///
    /// # Errors
    ///
    /// Same as [`RoofGateway::send_emergency_message`].
    pub async fn engage_partner_sales(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<String, GatewayError> {
        let request = prompts::sales_request(message, history);
        let response = self.call("partner sales", &self.text_model, &request).await?;
        Ok(text_or(&response, SALES_EMPTY_REPLY))
    }

    /// Drafts a personalised partner invitation email.
    ///
    /// # Errors
    ///
    /// Returns a provider error when the call cannot complete, or
    /// [`GatewayError::MalformedResponse`] if the answer lacks a non-empty
    /// `subject` or `body`.
    pub async fn generate_outreach_email(
        &self,
        company_name: &str,
        city: &str,
        website: Option<&str>,
        instructions: Option<&str>,
    ) -> Result<GeneratedEmail, GatewayError> {
        let request = prompts::outreach_request(company_name, city, website, instructions);
        let response = self.call("outreach email", &self.text_model, &request).await?;
        parse_generated_email(&response.text())
    }

    /// Generates marketing copy, strategy bullets, and pricing tiers.
    /// Persisting the result is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns a provider error when the call cannot complete, or
    /// [`GatewayError::MalformedResponse`] if the answer is not a complete
    /// strategy object.
    pub async fn generate_network_strategy(
        &self,
        market_context: &str,
    ) -> Result<ListingStrategy, GatewayError> {
        let request = prompts::strategy_request(market_context);
        let response = self
            .call("network strategy", &self.text_model, &request)
            .await?;
        parse_listing_strategy(&response.text())
    }

    /// Estimates a roofing job and recommends grounded local companies.
    ///
    /// The estimate fields and the roofers come from independent parts of
    /// the response; a missing roofer list is not an error.
    ///
    /// # Errors
    ///
    /// Returns a provider error when the call cannot complete, or
    /// [`GatewayError::MalformedResponse`] if the answer text contains no
    /// JSON object.
    pub async fn get_roofing_estimate(
        &self,
        request: &EstimateRequest,
    ) -> Result<EstimationResult, GatewayError> {
        let payload = prompts::estimate_request(request);
        let response = self
            .call("roofing estimate", &self.grounded_model, &payload)
            .await?;
        let roofers = roofers_from_grounding(response.grounding_chunks(), ESTIMATE_PLACEHOLDER_NAME);
        parse_estimate(&response.text(), roofers)
    }

    async fn call(
        &self,
        intent: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GatewayError> {
        self.client
            .generate_content(model, request)
            .await
            .inspect_err(|e| tracing::warn!(intent, model, error = %e, "gateway call failed"))
    }
}

fn text_or(response: &GenerateContentResponse, placeholder: &str) -> String {
    let text = response.text();
    if text.is_empty() {
        placeholder.to_string()
    } else {
        text
    }
}
