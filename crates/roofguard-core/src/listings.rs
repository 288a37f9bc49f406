//! Partner-network listing content: outreach emails and the growth strategy
//! shown on the listing page.

use serde::{Deserialize, Serialize};

/// An outreach email drafted for a prospective partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedEmail {
    pub subject: String,
    pub body: String,
}

/// One subscription tier on the listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingOption {
    pub tier: String,
    pub price: String,
    pub features: Vec<String>,
}

/// Marketing copy, strategy bullets, and pricing tiers for the listing page.
///
/// Every field is required when deserializing; a payload missing any of them
/// is rejected rather than partially filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingStrategy {
    pub marketing_copy: String,
    /// Newline-delimited bullet points.
    pub marketing_strategy: String,
    pub pricing_options: Vec<PricingOption>,
}

impl ListingStrategy {
    /// Splits `marketing_strategy` into its bullet lines, dropping blank lines.
    #[must_use]
    pub fn strategy_points(&self) -> Vec<&str> {
        self.marketing_strategy
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

fn tier(tier: &str, price: &str, features: &[&str]) -> PricingOption {
    PricingOption {
        tier: tier.to_string(),
        price: price.to_string(),
        features: features.iter().map(|f| (*f).to_string()).collect(),
    }
}

impl Default for ListingStrategy {
    fn default() -> Self {
        Self {
            marketing_copy: "The Future of GTA Emergency Roofing is Here. Join the elite network \
                             providing 24/7 relief."
                .to_string(),
            marketing_strategy: "• Dominant local SEO presence\n• Pre-triaged emergency leads\n\
                                 • Brand association with GTA Roof Guard"
                .to_string(),
            pricing_options: vec![
                tier(
                    "Essential",
                    "$49",
                    &[
                        "Basic SEO Listing",
                        "Emergency Lead Notifications",
                        "Standard Support",
                    ],
                ),
                tier(
                    "Professional",
                    "$149",
                    &[
                        "Priority Dispatching",
                        "Vetted Badge",
                        "Advanced Analytics",
                        "24/7 Support",
                    ],
                ),
                tier(
                    "Elite",
                    "$399",
                    &[
                        "Exclusive City Territory",
                        "Dedicated Account Manager",
                        "Custom Marketing Kit",
                        "Unlimited Lead Routing",
                    ],
                ),
            ],
        }
    }
}
