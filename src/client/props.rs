//! Projections endpoint client
//!
//! Fetches enhanced player prop projections. The endpoint returns either a
//! bare JSON array or an envelope wrapping it, and field names drift between
//! backend versions, so decoding is deliberately tolerant.

use crate::data::PropsSource;
use crate::error::Result;
use crate::types::{MlPrediction, Projection, RiskLevel};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use tracing::debug;

#[derive(Clone)]
pub struct PropsClient {
    http: reqwest::Client,
    base_url: String,
    sport: Option<String>,
    min_confidence: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawProjection {
    id: Option<String>,
    player_name: Option<String>,
    team: Option<String>,
    sport: Option<String>,
    league: Option<String>,
    stat_type: Option<String>,
    #[serde(alias = "line_score")]
    line: Option<Decimal>,
    confidence: Option<Decimal>,
    odds: Option<Decimal>,
    #[serde(alias = "value")]
    expected_value: Option<Decimal>,
    #[serde(alias = "kelly_percentage")]
    kelly_pct: Option<Decimal>,
    risk_level: Option<String>,
    recommendation: Option<String>,
    ml_prediction: Option<RawMlPrediction>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawMlPrediction {
    #[serde(alias = "prediction")]
    predicted_value: Option<Decimal>,
    #[serde(alias = "probability")]
    win_probability: Option<Decimal>,
    #[serde(alias = "model_version")]
    model: Option<String>,
    #[serde(default, alias = "shap_factors")]
    top_factors: Vec<String>,
}

/// The endpoint has shipped three shapes over time
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PropsPayload {
    Projections { projections: Vec<RawProjection> },
    Data { data: Vec<RawProjection> },
    List(Vec<RawProjection>),
}

impl PropsPayload {
    fn into_raw(self) -> Vec<RawProjection> {
        match self {
            PropsPayload::Projections { projections } => projections,
            PropsPayload::Data { data } => data,
            PropsPayload::List(list) => list,
        }
    }
}

impl PropsClient {
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        sport: Option<String>,
        min_confidence: Option<u32>,
    ) -> Self {
        Self {
            http,
            base_url,
            sport,
            min_confidence,
        }
    }

    /// Get the current enhanced projections, applying the configured
    /// server-side sport and confidence filters.
    pub async fn get_enhanced_props(&self) -> Result<Vec<Projection>> {
        let url = format!("{}/api/prizepicks/props/enhanced", self.base_url);

        let mut request = self.http.get(&url);
        if let Some(sport) = &self.sport {
            request = request.query(&[("sport", sport.as_str())]);
        }
        if let Some(min) = self.min_confidence {
            request = request.query(&[("min_confidence", min.to_string())]);
        }

        let payload: PropsPayload = request.send().await?.json().await?;
        let raw = payload.into_raw();
        debug!("Fetched {} raw projections", raw.len());

        Ok(raw.into_iter().map(parse_projection).collect())
    }
}

#[async_trait]
impl PropsSource for PropsClient {
    async fn fetch_projections(&self) -> Result<Vec<Projection>> {
        self.get_enhanced_props().await
    }

    fn name(&self) -> &str {
        "props-api"
    }
}

fn parse_projection(raw: RawProjection) -> Projection {
    let sport = raw.sport.unwrap_or_default();
    Projection {
        id: raw
            .id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        player_name: raw.player_name.unwrap_or_default(),
        team: raw.team.unwrap_or_default(),
        // Feeds without a league field use the sport name for both
        league: raw.league.unwrap_or_else(|| sport.clone()),
        sport,
        stat_type: raw.stat_type.unwrap_or_default(),
        line: raw.line.unwrap_or(Decimal::ZERO),
        confidence: raw.confidence.unwrap_or(dec!(75)),
        odds: raw.odds,
        expected_value: raw.expected_value,
        kelly_pct: raw.kelly_pct,
        risk_level: raw.risk_level.as_deref().and_then(parse_risk_level),
        recommendation: raw.recommendation,
        ml_prediction: raw.ml_prediction.and_then(parse_ml_prediction),
        fetched_at: Utc::now(),
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

fn parse_ml_prediction(raw: RawMlPrediction) -> Option<MlPrediction> {
    Some(MlPrediction {
        predicted_value: raw.predicted_value?,
        win_probability: raw.win_probability.unwrap_or(Decimal::ZERO),
        model: raw.model,
        top_factors: raw.top_factors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bare_array() {
        let json = r#"[
            {"id": "nba-1", "player_name": "LeBron James", "team": "LAL",
             "sport": "NBA", "stat_type": "Points", "line": 25.5,
             "confidence": 87.5, "odds": -115, "expected_value": 4.2,
             "kelly_percentage": 2.5, "risk_level": "low"}
        ]"#;
        let payload: PropsPayload = serde_json::from_str(json).unwrap();
        let raw = payload.into_raw();
        assert_eq!(raw.len(), 1);

        let p = parse_projection(raw.into_iter().next().unwrap());
        assert_eq!(p.id, "nba-1");
        assert_eq!(p.player_name, "LeBron James");
        assert_eq!(p.line, dec!(25.5));
        assert_eq!(p.confidence, dec!(87.5));
        assert_eq!(p.kelly_pct, Some(dec!(2.5)));
        assert_eq!(p.risk_level, Some(RiskLevel::Low));
        // League falls back to the sport name
        assert_eq!(p.league, "NBA");
    }

    #[test]
    fn test_decode_projections_envelope() {
        let json = r#"{"projections": [
            {"id": "p1", "player_name": "A", "sport": "MLB",
             "stat_type": "Hits", "line_score": 1.5, "confidence": 70}
        ]}"#;
        let payload: PropsPayload = serde_json::from_str(json).unwrap();
        let raw = payload.into_raw();
        assert_eq!(raw.len(), 1);
        // line_score alias maps onto line
        assert_eq!(raw[0].line, Some(dec!(1.5)));
    }

    #[test]
    fn test_decode_data_envelope() {
        let json = r#"{"data": [{"id": "p1"}, {"id": "p2"}]}"#;
        let payload: PropsPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.into_raw().len(), 2);
    }

    #[test]
    fn test_missing_confidence_defaults() {
        let p = parse_projection(RawProjection {
            id: Some("p1".to_string()),
            player_name: Some("A".to_string()),
            team: None,
            sport: None,
            league: None,
            stat_type: None,
            line: None,
            confidence: None,
            odds: None,
            expected_value: None,
            kelly_pct: None,
            risk_level: None,
            recommendation: None,
            ml_prediction: None,
        });
        assert_eq!(p.confidence, dec!(75));
        assert_eq!(p.line, Decimal::ZERO);
    }

    #[test]
    fn test_unknown_risk_level_is_dropped() {
        assert_eq!(parse_risk_level("extreme"), None);
        assert_eq!(parse_risk_level("HIGH"), Some(RiskLevel::High));
    }

    #[test]
    fn test_ml_prediction_aliases() {
        let json = r#"{"prediction": 26.1, "probability": 0.64,
                       "model_version": "xgb-4.2",
                       "shap_factors": ["recent_form", "matchup"]}"#;
        let raw: RawMlPrediction = serde_json::from_str(json).unwrap();
        let ml = parse_ml_prediction(raw).unwrap();
        assert_eq!(ml.predicted_value, dec!(26.1));
        assert_eq!(ml.win_probability, dec!(0.64));
        assert_eq!(ml.model.as_deref(), Some("xgb-4.2"));
        assert_eq!(ml.top_factors.len(), 2);
    }
}
