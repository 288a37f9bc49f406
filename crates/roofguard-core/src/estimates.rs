use serde::{Deserialize, Serialize};

use crate::roofers::Roofer;

/// Inputs for a roofing cost estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    /// Roof area in square feet.
    pub size_sq_ft: u32,
    pub material: String,
    pub complexity: String,
    pub city: String,
}

/// A cost estimate with display-ready text and the companies grounded for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    /// Display string such as `"$9,000 - $11,000"`; not parsed into numbers.
    pub estimated_cost_range: String,
    pub breakdown: String,
    pub market_insights: String,
    pub recommended_companies: Vec<Roofer>,
}

impl EstimationResult {
    /// The first `n` recommended companies, in relevance order.
    #[must_use]
    pub fn top_companies(&self, n: usize) -> &[Roofer] {
        let end = n.min(self.recommended_companies.len());
        &self.recommended_companies[..end]
    }
}
