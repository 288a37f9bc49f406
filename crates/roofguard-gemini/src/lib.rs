//! Gateway to the Gemini `generateContent` API for the Roof Guard assistants.
//!
//! [`RoofGateway`] exposes one call per domain intent (dispatch chat, partner
//! sales chat, outreach email, listing strategy, cost estimate). Each call is
//! a single request/response exchange with no retry; the provider's answer is
//! normalized into `roofguard_core` types, and anything that cannot be
//! normalized surfaces as [`GatewayError::MalformedResponse`].

pub mod client;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod normalize;
pub mod prompts;
pub mod types;

pub use client::GeminiClient;
pub use error::{ErrorKind, GatewayError};
pub use extract::extract_json_object;
pub use gateway::{EmergencyReply, RoofGateway};
pub use normalize::{roofers_from_grounding, GroundingChunk};
pub use types::{GenerateContentRequest, GenerateContentResponse};
