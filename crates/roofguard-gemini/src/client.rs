//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! Wraps `reqwest` with credential handling, base-URL normalisation, and
//! error-body decoding. It sends exactly one request per call and never
//! retries; retry decisions belong to the user.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GatewayError;
use crate::types::{GenerateContentRequest, GenerateContentResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini REST API.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client pointed at the production Gemini API.
    ///
    /// A missing `api_key` is accepted here; every call then fails with
    /// [`GatewayError::MissingCredential`] before touching the network.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GatewayError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GatewayError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so relative joins append to the path.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GatewayError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_owned),
            base_url,
        })
    }

    /// Sends one `generateContent` request for `model`.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::MissingCredential`] if no API key is configured.
    /// - [`GatewayError::Http`] on network failure.
    /// - [`GatewayError::UnexpectedStatus`] on a non-2xx status; the
    ///   provider's `error.message` is used when the body carries one.
    /// - [`GatewayError::MalformedResponse`] if a 2xx body is not a valid
    ///   `generateContent` response.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GatewayError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GatewayError::MissingCredential)?;
        let url = self.endpoint(model)?;

        tracing::debug!(
            model,
            turns = request.contents.len(),
            tools = request.tools.len(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = Self::provider_error_message(&body);
            tracing::warn!(model, status = status.as_u16(), %message, "provider rejected request");
            return Err(GatewayError::UnexpectedStatus {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| GatewayError::MalformedResponse {
            context: format!("generateContent({model})"),
            reason: e.to_string(),
        })
    }

    /// Builds `{base}/v1beta/models/{model}:generateContent`.
    fn endpoint(&self, model: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(&format!("v1beta/models/{model}:generateContent"))
            .map_err(|e| GatewayError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: format!("cannot build endpoint for model '{model}': {e}"),
            })
    }

    /// Pulls `error.message` out of a provider error body, falling back to
    /// the raw body.
    fn provider_error_message(body: &str) -> String {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    "empty response body".to_string()
                } else {
                    trimmed.chars().take(200).collect()
                }
            })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
