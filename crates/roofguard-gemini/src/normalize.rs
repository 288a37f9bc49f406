//! Normalization of provider payloads into `roofguard_core` domain types.

use roofguard_core::{EstimationResult, GeneratedEmail, GeoPoint, ListingStrategy, Roofer};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::GatewayError;
use crate::extract::extract_json_object;
use crate::types::LatLng;

/// Roofer name used by the dispatch chat when a place has no title.
pub const DISPATCH_PLACEHOLDER_NAME: &str = "Emergency Crew";
/// Roofer name used by the estimator when a place has no title.
pub const ESTIMATE_PLACEHOLDER_NAME: &str = "Elite Installer";

pub const DEFAULT_COST_RANGE: &str = "Contact for pricing";
pub const DEFAULT_BREAKDOWN: &str = "Detailed estimation currently unavailable.";
pub const DEFAULT_MARKET_INSIGHTS: &str = "Local market data restricted.";

// ---------------------------------------------------------------------------
// Grounding chunks
// ---------------------------------------------------------------------------

/// A decoded grounding chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum GroundingChunk {
    Maps(MapsPlace),
    Web(WebSource),
}

/// The `maps` variant of a grounding chunk. Every field is optional because
/// the provider omits whatever it does not know about a place.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapsPlace {
    #[serde(default, deserialize_with = "lenient")]
    pub uri: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub user_rating_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub lat_lng: Option<PartialLatLng>,
    #[serde(default, deserialize_with = "lenient")]
    pub place_answer_sources: Option<PlaceAnswerSources>,
    /// Older payloads carry review snippets under `source`.
    #[serde(default, deserialize_with = "lenient")]
    pub source: Option<PlaceAnswerSources>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct PartialLatLng {
    #[serde(default, deserialize_with = "lenient")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub longitude: Option<f64>,
}

impl PartialLatLng {
    fn complete(self) -> Option<LatLng> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(LatLng {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceAnswerSources {
    #[serde(default, deserialize_with = "lenient")]
    pub review_snippets: Option<Vec<ReviewSnippet>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReviewSnippet {
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WebSource {
    #[serde(default, deserialize_with = "lenient")]
    pub uri: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
}

impl GroundingChunk {
    /// Decodes one raw chunk. Returns `None` unless the chunk carries a
    /// `maps` or `web` object. Fields inside that object are read one by
    /// one, so a mistyped field is dropped without losing the chunk.
    #[must_use]
    pub fn decode(raw: &Value) -> Option<Self> {
        if let Some(maps) = raw.get("maps") {
            return maps
                .is_object()
                .then(|| serde_json::from_value::<MapsPlace>(maps.clone()).ok())
                .flatten()
                .map(GroundingChunk::Maps);
        }
        if let Some(web) = raw.get("web") {
            return web
                .is_object()
                .then(|| serde_json::from_value::<WebSource>(web.clone()).ok())
                .flatten()
                .map(GroundingChunk::Web);
        }
        None
    }
}

impl MapsPlace {
    /// Maps the place into a [`Roofer`], using `placeholder_name` when the
    /// place has no usable title.
    #[must_use]
    pub fn into_roofer(self, placeholder_name: &str) -> Roofer {
        let review_snippet = self
            .place_answer_sources
            .or(self.source)
            .and_then(|s| s.review_snippets?.into_iter().next())
            .and_then(|s| s.text)
            .filter(|t| !t.is_empty());
        let location = self
            .lat_lng
            .and_then(PartialLatLng::complete)
            .map(|ll| GeoPoint {
                lat: ll.latitude,
                lng: ll.longitude,
            });

        let mut roofer = Roofer::named(
            self.title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| placeholder_name.to_string()),
        );
        roofer.uri = self.uri;
        roofer.address = self.address;
        roofer.phone = self.phone_number;
        roofer.rating = self.rating;
        roofer.reviews = self.user_rating_count;
        roofer.review_snippet = review_snippet;
        roofer.location = location;
        roofer
    }
}

/// Builds one [`Roofer`] per map-grounded chunk, preserving provider order.
///
/// Web chunks, chunks without grounding data, and chunks that fail to decode
/// contribute nothing; none of them is an error.
#[must_use]
pub fn roofers_from_grounding(chunks: &[Value], placeholder_name: &str) -> Vec<Roofer> {
    chunks
        .iter()
        .filter_map(GroundingChunk::decode)
        .filter_map(|chunk| match chunk {
            GroundingChunk::Maps(place) => Some(place.into_roofer(placeholder_name)),
            GroundingChunk::Web(_) => None,
        })
        .collect()
}

/// Reads an optional field, treating a value of the wrong type as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

// ---------------------------------------------------------------------------
// Structured payloads
// ---------------------------------------------------------------------------

/// Treats an empty answer as an empty JSON object so the missing-field
/// checks below report it.
fn json_text(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        "{}"
    } else {
        trimmed
    }
}

/// Parses a schema-constrained outreach email.
///
/// # Errors
///
/// Returns [`GatewayError::MalformedResponse`] if the text is not JSON, or if
/// `subject` or `body` is missing, not a string, or blank.
pub fn parse_generated_email(text: &str) -> Result<GeneratedEmail, GatewayError> {
    const CONTEXT: &str = "outreach email";
    let email: GeneratedEmail = serde_json::from_str(json_text(text))
        .map_err(|e| GatewayError::malformed(CONTEXT, e.to_string()))?;
    if email.subject.trim().is_empty() {
        return Err(GatewayError::malformed(CONTEXT, "subject is empty"));
    }
    if email.body.trim().is_empty() {
        return Err(GatewayError::malformed(CONTEXT, "body is empty"));
    }
    Ok(email)
}

/// Parses a listing strategy. Every field is required.
///
/// # Errors
///
/// Returns [`GatewayError::MalformedResponse`] if the text is not JSON or
/// does not have the [`ListingStrategy`] shape.
pub fn parse_listing_strategy(text: &str) -> Result<ListingStrategy, GatewayError> {
    serde_json::from_str(json_text(text))
        .map_err(|e| GatewayError::malformed("network strategy", e.to_string()))
}

fn string_field(map: &Map<String, Value>, key: &str, default: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Builds an [`EstimationResult`] from free-form model text and the roofers
/// already extracted from grounding metadata.
///
/// The JSON object is located with [`extract_json_object`]. Missing, empty,
/// or non-string fields fall back to display placeholders.
///
/// # Errors
///
/// Returns [`GatewayError::MalformedResponse`] if no JSON object can be found
/// in `text`.
pub fn parse_estimate(text: &str, roofers: Vec<Roofer>) -> Result<EstimationResult, GatewayError> {
    let map = extract_json_object(text)
        .ok_or_else(|| GatewayError::malformed("roofing estimate", "no JSON object found"))?;

    Ok(EstimationResult {
        estimated_cost_range: string_field(&map, "estimatedCostRange", DEFAULT_COST_RANGE),
        breakdown: string_field(&map, "breakdown", DEFAULT_BREAKDOWN),
        market_insights: string_field(&map, "marketInsights", DEFAULT_MARKET_INSIGHTS),
        recommended_companies: roofers,
    })
}
