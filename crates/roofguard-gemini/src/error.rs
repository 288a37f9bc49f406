use thiserror::Error;

/// Errors returned by the Gemini gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No API key was configured, so no request was sent.
    #[error("API key is missing")]
    MissingCredential,

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("provider returned HTTP {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The call completed but the payload did not have the expected shape,
    /// even after best-effort extraction.
    #[error("malformed response for {context}: {reason}")]
    MalformedResponse { context: String, reason: String },
}

/// Two-way classification used by callers to decide how to present a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The call itself could not complete (credential, transport, provider fault).
    Provider,
    /// The call completed but its payload could not be normalized.
    MalformedResponse,
}

impl GatewayError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            GatewayError::MissingCredential
            | GatewayError::Http(_)
            | GatewayError::UnexpectedStatus { .. }
            | GatewayError::InvalidBaseUrl { .. } => ErrorKind::Provider,
        }
    }

    pub(crate) fn malformed(context: &str, reason: impl Into<String>) -> Self {
        GatewayError::MalformedResponse {
            context: context.to_string(),
            reason: reason.into(),
        }
    }
}
