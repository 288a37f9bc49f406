//! Integration tests for `RoofGateway` using wiremock HTTP mocks.
//!
//! Each test stands up a local server playing the Gemini API, so no real
//! network traffic is made.

use roofguard_core::{Conversation, EstimateRequest, LocationState};
use roofguard_gemini::{ErrorKind, GatewayError, GeminiClient, RoofGateway};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const GROUNDED_MODEL: &str = "gemini-2.5-flash";
const TEXT_MODEL: &str = "gemini-3-flash-preview";

fn grounded_path() -> String {
    format!("/v1beta/models/{GROUNDED_MODEL}:generateContent")
}

fn text_path() -> String {
    format!("/v1beta/models/{TEXT_MODEL}:generateContent")
}

fn test_gateway(base_url: &str) -> RoofGateway {
    let client = GeminiClient::with_base_url(Some("test-key"), 5, "roofguard-test/0.1", base_url)
        .expect("client construction should not fail");
    RoofGateway::new(client, GROUNDED_MODEL, TEXT_MODEL)
}

/// A `generateContent` response with one text part and optional grounding chunks.
fn answer(text: &str, chunks: Vec<Value>) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP",
            "groundingMetadata": { "groundingChunks": chunks }
        }]
    })
}

fn maps_chunk(title: &str) -> Value {
    json!({ "maps": { "title": title, "uri": format!("https://maps.google.com/?q={title}") } })
}

async fn received_body(server: &MockServer) -> Value {
    let requests: Vec<Request> = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1, "exactly one provider call expected");
    serde_json::from_slice(&requests[0].body).expect("request body is JSON")
}

// ---------------------------------------------------------------------------
// send_emergency_message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn emergency_message_returns_text_and_grounded_roofers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(grounded_path()))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer(
            "Two crews are available near you.",
            vec![
                maps_chunk("Apex Roofing"),
                json!({ "web": { "uri": "https://example.com" } }),
                json!({ "maps": { "rating": 4.2 } }),
            ],
        )))
        .mount(&server)
        .await;

    let gateway = test_gateway(&server.uri());
    let reply = gateway
        .send_emergency_message("L4J 7Y8, shingles peeling after windstorm", &[], None)
        .await
        .expect("dispatch reply");

    assert_eq!(reply.text, "Two crews are available near you.");
    let names: Vec<&str> = reply.roofers.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Apex Roofing", "Emergency Crew"]);
    assert_eq!(reply.roofers[1].rating, Some(4.2));
}

#[tokio::test]
async fn emergency_message_keeps_roofers_with_mistyped_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(grounded_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer(
            "Three crews nearby.",
            vec![
                json!({ "maps": { "title": "Apex Roofing", "rating": "4.8" } }),
                json!({ "maps": { "title": "Birch Roofing", "userRatingCount": 12.0 } }),
                json!({ "maps": { "latLng": { "latitude": "43.6", "longitude": -79.4 } } }),
            ],
        )))
        .mount(&server)
        .await;

    let reply = test_gateway(&server.uri())
        .send_emergency_message("Water coming through the ceiling", &[], None)
        .await
        .expect("dispatch reply");

    let names: Vec<&str> = reply.roofers.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Apex Roofing", "Birch Roofing", "Emergency Crew"]);
    assert!(reply.roofers.iter().all(|r| r.rating.is_none() && r.location.is_none()));
}

#[tokio::test]
async fn emergency_message_sends_single_turn_without_location() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(grounded_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("ok", vec![])))
        .mount(&server)
        .await;

    let gateway = test_gateway(&server.uri());
    let denied = LocationState::default();
    gateway
        .send_emergency_message("L4J 7Y8, shingles peeling after windstorm", &[], Some(&denied))
        .await
        .expect("dispatch reply");

    let body = received_body(&server).await;
    assert_eq!(
        body["contents"],
        json!([{
            "role": "user",
            "parts": [{ "text": "L4J 7Y8, shingles peeling after windstorm" }]
        }])
    );
    assert!(body.get("toolConfig").is_none());
    assert_eq!(body["tools"], json!([{ "googleMaps": {} }]));
}

#[tokio::test]
async fn emergency_message_replays_history_without_system_turns() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(grounded_path()))
        .and(body_partial_json(json!({
            "toolConfig": { "retrievalConfig": { "latLng": { "latitude": 43.86, "longitude": -79.43 } } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("ok", vec![])))
        .mount(&server)
        .await;

    let mut conversation = Conversation::with_greeting("Unit active.");
    conversation.push_user("Water is coming through the ceiling");
    conversation.push_system("Connection Issue: timeout", true);

    let location = LocationState {
        lat: Some(43.86),
        lng: Some(-79.43),
        ..LocationState::default()
    };
    let gateway = test_gateway(&server.uri());
    gateway
        .send_emergency_message("Still leaking", conversation.messages(), Some(&location))
        .await
        .expect("dispatch reply");

    let body = received_body(&server).await;
    let roles: Vec<&str> = body["contents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["role"].as_str().unwrap())
        .collect();
    assert_eq!(roles, vec!["model", "user", "user"]);
    assert_eq!(body["contents"][2]["parts"][0]["text"], "Still leaking");
}

#[tokio::test]
async fn emergency_message_without_text_uses_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(grounded_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let reply = test_gateway(&server.uri())
        .send_emergency_message("help", &[], None)
        .await
        .expect("dispatch reply");
    assert_eq!(reply.text, "Dispatch processing...");
    assert!(reply.roofers.is_empty());
}

#[tokio::test]
async fn provider_failure_is_a_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": { "code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_gateway(&server.uri())
        .send_emergency_message("help", &[], None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Provider);
    assert!(
        matches!(err, GatewayError::UnexpectedStatus { status: 503, ref message } if message == "The model is overloaded."),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn missing_credential_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("ok", vec![])))
        .expect(0)
        .mount(&server)
        .await;

    let client = GeminiClient::with_base_url(None, 5, "roofguard-test/0.1", &server.uri())
        .expect("client construction should not fail");
    let gateway = RoofGateway::new(client, GROUNDED_MODEL, TEXT_MODEL);
    let err = gateway
        .send_emergency_message("help", &[], None)
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::MissingCredential));
    assert_eq!(err.kind(), ErrorKind::Provider);
}

#[tokio::test]
async fn non_json_success_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = test_gateway(&server.uri())
        .send_emergency_message("help", &[], None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

// ---------------------------------------------------------------------------
// engage_partner_sales
// ---------------------------------------------------------------------------

#[tokio::test]
async fn partner_sales_uses_text_model_without_tools() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(text_path()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(answer("### One call pays for a year", vec![])),
        )
        .mount(&server)
        .await;

    let reply = test_gateway(&server.uri())
        .engage_partner_sales("Why join?", &[])
        .await
        .expect("sales reply");
    assert_eq!(reply, "### One call pays for a year");

    let body = received_body(&server).await;
    assert!(body.get("tools").is_none());
    assert!(body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .contains("Senior Growth Consultant"));
}

#[tokio::test]
async fn partner_sales_empty_reply_uses_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("", vec![])))
        .mount(&server)
        .await;

    let reply = test_gateway(&server.uri())
        .engage_partner_sales("Hi", &[])
        .await
        .expect("sales reply");
    assert_eq!(
        reply,
        "Our growth team is currently scaling operations. Join the waitlist."
    );
}

// ---------------------------------------------------------------------------
// generate_outreach_email
// ---------------------------------------------------------------------------

#[tokio::test]
async fn outreach_email_parses_structured_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(text_path()))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" },
            "tools": [{ "googleSearch": {} }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer(
            r#"{"subject": "Apex Roofing x GTA Roof Guard", "body": "Hi Apex team,\nMarcus is standing by."}"#,
            vec![],
        )))
        .mount(&server)
        .await;

    let email = test_gateway(&server.uri())
        .generate_outreach_email("Apex Roofing", "Vaughan", Some("apexroofing.ca"), None)
        .await
        .expect("email");
    assert_eq!(email.subject, "Apex Roofing x GTA Roof Guard");
    assert!(email.body.contains("Marcus"));
}

#[tokio::test]
async fn outreach_email_without_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(answer(r#"{"subject": "Hello"}"#, vec![])),
        )
        .mount(&server)
        .await;

    let err = test_gateway(&server.uri())
        .generate_outreach_email("Apex Roofing", "Vaughan", None, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

// ---------------------------------------------------------------------------
// generate_network_strategy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn network_strategy_parses_json_answer() {
    let server = MockServer::start().await;
    let strategy = json!({
        "marketingCopy": "Own the storm season",
        "marketingStrategy": "• Be first on site\n• Win insurance work\n• Lock your territory",
        "pricingOptions": [
            { "tier": "Essential", "price": "$59", "features": ["Listing"] },
            { "tier": "Pro", "price": "$169", "features": ["Priority"] },
            { "tier": "Elite", "price": "$449", "features": ["Exclusive"] }
        ]
    });
    Mock::given(method("POST"))
        .and(path(text_path()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(answer(&strategy.to_string(), vec![])),
        )
        .mount(&server)
        .await;

    let result = test_gateway(&server.uri())
        .generate_network_strategy("Ice dam season in Durham")
        .await
        .expect("strategy");
    assert_eq!(result.marketing_copy, "Own the storm season");
    assert_eq!(result.strategy_points().len(), 3);
    assert_eq!(result.pricing_options[2].price, "$449");
}

#[tokio::test]
async fn network_strategy_non_json_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(answer("Here is a great plan!", vec![])),
        )
        .mount(&server)
        .await;

    let err = test_gateway(&server.uri())
        .generate_network_strategy("anything")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

// ---------------------------------------------------------------------------
// get_roofing_estimate
// ---------------------------------------------------------------------------

fn toronto_request() -> EstimateRequest {
    EstimateRequest {
        size_sq_ft: 2000,
        material: "Asphalt Shingle".to_string(),
        complexity: "Moderate".to_string(),
        city: "Toronto".to_string(),
    }
}

#[tokio::test]
async fn estimate_extracts_embedded_json_and_roofers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(grounded_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer(
            r#"Here is your estimate: {"estimatedCostRange":"$9,000 - $11,000","breakdown":"...","marketInsights":"..."}"#,
            vec![maps_chunk("North Star Roofing"), json!({ "maps": {} })],
        )))
        .mount(&server)
        .await;

    let result = test_gateway(&server.uri())
        .get_roofing_estimate(&toronto_request())
        .await
        .expect("estimate");
    assert_eq!(result.estimated_cost_range, "$9,000 - $11,000");
    let names: Vec<&str> = result
        .recommended_companies
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["North Star Roofing", "Elite Installer"]);

    let body = received_body(&server).await;
    assert!(body.get("generationConfig").is_none());
}

#[tokio::test]
async fn estimate_without_grounding_still_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"breakdown\": \"Tear-off and install\"}" }] } }]
        })))
        .mount(&server)
        .await;

    let result = test_gateway(&server.uri())
        .get_roofing_estimate(&toronto_request())
        .await
        .expect("estimate");
    assert_eq!(result.estimated_cost_range, "Contact for pricing");
    assert_eq!(result.breakdown, "Tear-off and install");
    assert!(result.recommended_companies.is_empty());
}

#[tokio::test]
async fn estimate_without_json_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer(
            "I could not produce an estimate.",
            vec![maps_chunk("Apex Roofing")],
        )))
        .mount(&server)
        .await;

    let err = test_gateway(&server.uri())
        .get_roofing_estimate(&toronto_request())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}
