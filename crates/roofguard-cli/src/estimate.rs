use roofguard_core::{EstimateRequest, EstimationResult};
use roofguard_gemini::RoofGateway;

use crate::chat::render_roofer;

/// Number of recommended companies shown with an estimate.
const TOP_COMPANIES: usize = 3;

/// Request an estimate and print it with the top recommended companies.
///
/// # Errors
///
/// Returns an error if the estimate could not be produced.
pub(crate) async fn run_estimate(
    gateway: &RoofGateway,
    request: &EstimateRequest,
) -> anyhow::Result<()> {
    println!(
        "Estimating {} sq ft of {} in {}...",
        request.size_sq_ft, request.material, request.city
    );
    let result = gateway
        .get_roofing_estimate(request)
        .await
        .map_err(|e| anyhow::anyhow!("Estimation failed. Please check your connection. ({e})"))?;

    println!("{}", render_estimate(request, &result));
    Ok(())
}

pub(crate) fn render_estimate(request: &EstimateRequest, result: &EstimationResult) -> String {
    let mut out = format!(
        "\nEstimated cost: {}\n  {} sq ft | {} | {} | {}\n\n{}\n\nMarket insights\n  {}\n",
        result.estimated_cost_range,
        request.size_sq_ft,
        request.material,
        request.complexity,
        request.city,
        result.breakdown,
        result.market_insights,
    );

    let top = result.top_companies(TOP_COMPANIES);
    if top.is_empty() {
        out.push_str("\nNo verified installers found for this area.\n");
    } else {
        out.push_str("\nRecommended installers\n");
        for roofer in top {
            out.push_str(&render_roofer(roofer));
        }
    }
    out
}
