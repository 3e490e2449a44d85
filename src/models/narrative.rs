use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Narrative analysis document returned by the external text service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub overall_performance: String,
    pub channel_analysis: String,
    pub demographic_insights: String,
    pub optimization_opportunities: Vec<String>,
}

/// Recommendations document returned by the external text service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsReport {
    pub budget_reallocation: String,
    pub channel_recommendations: Vec<String>,
    pub targeting_recommendations: Vec<String>,
    pub creative_testing: Vec<String>,
    pub next_steps: Vec<String>,
}

/// Malformed JSON is a hard failure; the response shape is otherwise
/// taken at face value.
pub fn parse_analysis(body: &str) -> Result<AnalysisReport> {
    serde_json::from_str(body).context("Failed to parse analysis response from narrative service")
}

pub fn parse_recommendations(body: &str) -> Result<RecommendationsReport> {
    serde_json::from_str(body)
        .context("Failed to parse recommendations response from narrative service")
}
