//! System instructions and request builders for each assistant.
//!
//! The builders are pure so the exact payload for a given input can be
//! checked without a provider.

use roofguard_core::{ChatMessage, EstimateRequest, LocationState, Role};
use serde_json::json;

use crate::types::{
    Content, ContentRole, GenerateContentRequest, GenerationConfig, LatLng, RetrievalConfig, Tool,
    ToolConfig,
};

pub const DISPATCH_INSTRUCTION: &str = "\
You are the \"GTA Emergency Roof Response Unit\" Crisis Coordinator.
Your mission: Minimize water damage by connecting homeowners in the Greater Toronto Area with \
available 24/7 roofing crews.";

pub const SALES_INSTRUCTION: &str = "\
You are the \"Senior Growth Consultant\" for GTA Roof Guard.
Your sole objective is to persuade roofing company owners in the Greater Toronto Area to join our \
exclusive 24/7 emergency dispatch network.

TONE:
High-energy, professional, ROI-focused, and results-driven. You speak \"Business-to-Business\". \
Use direct, punchy, and persuasive language.

FORMATTING RULES:
- Use Markdown headers (###) for major selling points.
- Use **Bold text** for key ROI metrics, margins, and calls to action.
- Use bullet points for features.
- Ensure the response looks like a professional, high-conversion sales presentation.

KEY SELLING POINTS TO WEAVE IN:
1. PRE-TRIAGED LEADS: Our AI assesses damage severity before dispatching. No more \"tire kickers\". \
Mention 2x-3x higher margins for emergency jobs.
2. THE \"ACTIVE/INACTIVE\" TOGGLE: Partners have total control over lead flow.
3. GPS EFFICIENCY: Dispatching the closest available crew to slash fuel costs.
4. EXCLUSIVE TERRITORY: Priority for elite members in specific GTA zones.
5. NO CONTRACTS: Month-to-month results-based partnership.

OBJECTION HANDLING:
- Cost: One emergency call pays for a full year.
- Schedule: The toggle gives them control.";

pub const PARTNER_PORTAL_URL: &str = "https://gtaroofguard.ca/partner-growth";

pub const OUTREACH_INSTRUCTION: &str = "\
You are a \"Multi-Agent Outreach Crew\" (Researcher, Copywriter, and Compliance Officer) working \
for GTA Roof Guard.

AGENT WORKFLOW:
1. RESEARCHER: Use Google Search to analyze the company's online reputation, specific services \
(e.g., cedar, metal, shingles), and recent project highlights.
2. COPYWRITER: Write a highly personalized, B2B invitation email. Mention specific details found \
during research.
3. COMPLIANCE: Ensure the email follows GTA Roof Guard brand voice and uses the modern \"No-Call\" CTA.

CALL TO ACTION (CRITICAL):
Do NOT ask for a phone call or meeting. Instead, invite them to visit our \"Partner Growth Portal\" \
to experience our AI dispatch technology firsthand and chat with Marcus.
Tell them they can chat directly with \"Marcus\", our Senior Growth Consultant AI, who has already \
analyzed their local market data and is ready to show them their ROI projections and answer any \
questions.

LINK TO USE: https://gtaroofguard.ca/partner-growth";

pub const STRATEGY_INSTRUCTION: &str = "\
You are a high-performance B2B Marketing Agency consisting of three expert agents:
1. Copywriter: Writes persuasive, emotional, and benefit-driven headlines and copy to get roofing \
contractors excited about joining the GTA Roof Guard network.
2. Marketing Strategist: Outlines 3 key strategic growth moves for our partners to dominate their \
local GTA city.
3. Pricing Strategist: Develops three monthly subscription tiers (Essential, Pro, Elite) with \
realistic pricing and scaling features.

Your goal is to produce a \"Partner Growth Blueprint\" that will be displayed on our 'Add Listing' page.

OUTPUT FORMAT:
Return a JSON object with:
- marketingCopy: A strong sales headline and sub-headline.
- marketingStrategy: 3 key strategic points for the partner, one per line.
- pricingOptions: An array of 3 objects with 'tier', 'price' (monthly), and 'features' list.";

pub const ESTIMATOR_INSTRUCTION: &str = "\
You are a Toronto Roofing Cost Estimator Agent.
Your role is to provide realistic, local price ranges for roofing projects in the Greater Toronto Area.
Current Toronto Market Data:
- Asphalt Shingles: $4.50 - $6.50 per sq ft.
- Metal Roofing: $9.00 - $16.00 per sq ft.
- Slate/Tile: $20.00+ per sq ft.
- Complexity (Steep pitch, many valleys): Add 15-30% to base.

You must provide a professional breakdown and use Google Maps to find the top 3 highest-rated \
local companies to fulfill this specific request.

IMPORTANT: You must return your response as a valid JSON object. Do not include any other text \
outside the JSON structure.
JSON Structure:
{
  \"estimatedCostRange\": \"$12,000 - $15,500\",
  \"breakdown\": \"Explanation of size, material, labor...\",
  \"marketInsights\": \"Current local trends in GTA...\"
}";

const JSON_MIME_TYPE: &str = "application/json";

/// Replays prior user/assistant turns followed by `message` as the final
/// user turn. System turns never reach the provider.
#[must_use]
pub fn conversation_contents(history: &[ChatMessage], message: &str) -> Vec<Content> {
    history
        .iter()
        .filter_map(|turn| {
            let role = match turn.role() {
                Role::User => ContentRole::User,
                Role::Assistant => ContentRole::Model,
                Role::System => return None,
            };
            Some(Content::turn(role, turn.content()))
        })
        .chain(std::iter::once(Content::turn(ContentRole::User, message)))
        .collect()
}

/// Dispatch chat: map-grounded, biased toward the user's coordinates when
/// both are known.
#[must_use]
pub fn emergency_request(
    message: &str,
    history: &[ChatMessage],
    location: Option<&LocationState>,
) -> GenerateContentRequest {
    let tool_config = location
        .and_then(LocationState::coordinates)
        .map(|point| ToolConfig {
            retrieval_config: RetrievalConfig {
                lat_lng: LatLng {
                    latitude: point.lat,
                    longitude: point.lng,
                },
            },
        });

    GenerateContentRequest {
        contents: conversation_contents(history, message),
        system_instruction: Some(Content::text(DISPATCH_INSTRUCTION)),
        tools: vec![Tool::GoogleMaps {}],
        tool_config,
        generation_config: None,
    }
}

#[must_use]
pub fn sales_request(message: &str, history: &[ChatMessage]) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: conversation_contents(history, message),
        system_instruction: Some(Content::text(SALES_INSTRUCTION)),
        tools: Vec::new(),
        tool_config: None,
        generation_config: None,
    }
}

/// Outreach email: search-grounded with a schema requiring `subject` and `body`.
#[must_use]
pub fn outreach_request(
    company_name: &str,
    city: &str,
    website: Option<&str>,
    instructions: Option<&str>,
) -> GenerateContentRequest {
    let website = website
        .filter(|w| !w.trim().is_empty())
        .unwrap_or("Not provided (Search Google for this company in this city)");
    let instructions = instructions
        .filter(|i| !i.trim().is_empty())
        .unwrap_or("Ensure a warm but highly professional tone.");

    let prompt = format!(
        "TARGET COMPANY DATA:
- Name: {company_name}
- City: {city}
- Website: {website}

ADDITIONAL INSTRUCTIONS: {instructions}

TASK:
1. Researcher Agent: Perform a deep dive on {company_name}. Find their specific roofing \
specialties and check their recent Google reviews to find a positive detail to mention.
2. Copywriter Agent: Draft a personalized outreach email.

REQUIRED CALL TO ACTION:
Ensure the email specifically mentions \"Marcus\", our Senior Growth Consultant AI.
Invite them to: \"Experience our AI dispatch technology and chat directly with Marcus at our \
secure Partner Portal: {PARTNER_PORTAL_URL}\"
Emphasize that Marcus has already pre-calculated their local market ROI projections and is \
standing by to answer questions."
    );

    GenerateContentRequest {
        contents: vec![Content::turn(ContentRole::User, prompt)],
        system_instruction: Some(Content::text(OUTREACH_INSTRUCTION)),
        tools: vec![Tool::GoogleSearch {}],
        tool_config: None,
        generation_config: Some(GenerationConfig {
            response_mime_type: Some(JSON_MIME_TYPE.to_string()),
            response_schema: Some(json!({
                "type": "OBJECT",
                "properties": {
                    "subject": { "type": "STRING", "description": "The email subject line" },
                    "body": {
                        "type": "STRING",
                        "description": "The full email body text with personalization"
                    }
                },
                "required": ["subject", "body"]
            })),
        }),
    }
}

/// Listing strategy: JSON mode without a schema.
#[must_use]
pub fn strategy_request(market_context: &str) -> GenerateContentRequest {
    let prompt = format!(
        "MARKET CONTEXT: {market_context}

Develop a comprehensive partnership strategy for the GTA Roof Guard network including marketing \
copy and 3 subscription tiers."
    );

    GenerateContentRequest {
        contents: vec![Content::turn(ContentRole::User, prompt)],
        system_instruction: Some(Content::text(STRATEGY_INSTRUCTION)),
        tools: Vec::new(),
        tool_config: None,
        generation_config: Some(GenerationConfig {
            response_mime_type: Some(JSON_MIME_TYPE.to_string()),
            response_schema: None,
        }),
    }
}

/// Cost estimate: map-grounded, so JSON mode is unavailable and the object
/// has to be pulled out of the answer text.
#[must_use]
pub fn estimate_request(request: &EstimateRequest) -> GenerateContentRequest {
    let EstimateRequest {
        size_sq_ft,
        material,
        complexity,
        city,
    } = request;
    let prompt = format!(
        "Calculate a realistic roofing estimate for:
City: {city}
Roof Size: {size_sq_ft} sq ft
Material: {material}
Complexity: {complexity}

Find 3 high-rated local roofers in {city} that specialize in {material} installations using \
Google Maps.

IMPORTANT: Provide the estimation and breakdown in a valid JSON object as per the system instruction."
    );

    GenerateContentRequest {
        contents: vec![Content::turn(ContentRole::User, prompt)],
        system_instruction: Some(Content::text(ESTIMATOR_INSTRUCTION)),
        tools: vec![Tool::GoogleMaps {}],
        tool_config: None,
        generation_config: None,
    }
}
