//! AI explanations for projections
//!
//! Builds a natural-language prompt describing one projection and sends it
//! to the backend chat endpoint. The response is free text plus optional
//! structured fields.

use crate::error::Result;
use crate::types::{Projection, RiskLevel};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Explanation result
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    /// Free-text analysis
    pub content: String,
    pub confidence: Option<Decimal>,
    pub risk_level: Option<RiskLevel>,
    /// Factor name -> contribution weight
    pub factors: Vec<(String, f64)>,
    pub suggestions: Vec<String>,
}

/// Trait for explanation backends
#[async_trait]
pub trait ExplanationModel: Send + Sync {
    async fn explain(&self, projection: &Projection) -> Result<Explanation>;

    /// Model name for logging
    fn name(&self) -> &str;
}

/// Chat-endpoint-backed explanation model
#[derive(Clone)]
pub struct ChatModel {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequest {
    message: String,
    #[serde(rename = "analysisType")]
    analysis_type: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    content: String,
    confidence: Option<Decimal>,
    risk_level: Option<String>,
    #[serde(default)]
    suggestions: Vec<String>,
    #[serde(default)]
    shap_explanation: std::collections::HashMap<String, f64>,
}

impl ChatModel {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Prompt describing the projection for the chat backend
    pub fn build_prompt(projection: &Projection) -> String {
        format!(
            "Analyze this prop: {} ({}) {} {} — line {}, confidence {}%. \
             Should I take the over or the under?",
            projection.player_name,
            projection.team,
            projection.sport,
            projection.stat_type,
            projection.line,
            projection.confidence,
        )
    }
}

#[async_trait]
impl ExplanationModel for ChatModel {
    async fn explain(&self, projection: &Projection) -> Result<Explanation> {
        let url = format!("{}/api/propollama/chat", self.base_url);
        let request = ChatRequest {
            message: Self::build_prompt(projection),
            analysis_type: "prop".to_string(),
        };

        let resp: ChatResponse = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        let mut factors: Vec<(String, f64)> =
            resp.shap_explanation.into_iter().collect();
        // Stable display order, strongest factor first
        factors.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        Ok(Explanation {
            content: resp.content,
            confidence: resp.confidence,
            risk_level: resp.risk_level.as_deref().and_then(parse_risk_level),
            factors,
            suggestions: resp.suggestions,
        })
    }

    fn name(&self) -> &str {
        "propollama-chat"
    }
}

fn parse_risk_level(s: &str) -> Option<RiskLevel> {
    match s.to_lowercase().as_str() {
        "low" => Some(RiskLevel::Low),
        "medium" | "med" => Some(RiskLevel::Medium),
        "high" => Some(RiskLevel::High),
        _ => None,
    }
}
