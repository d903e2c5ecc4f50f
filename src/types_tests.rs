//! Tests for domain types

#[cfg(test)]
mod tests {
    use super::super::types::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_serde_round_trip() {
        assert_eq!(serde_json::to_string(&Side::Over).unwrap(), r#""over""#);
        assert_eq!(serde_json::to_string(&Side::Under).unwrap(), r#""under""#);
        assert_eq!(
            serde_json::from_str::<Side>(r#""over""#).unwrap(),
            Side::Over
        );
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Over.opposite(), Side::Under);
        assert_eq!(Side::Under.opposite(), Side::Over);
    }

    #[test]
    fn test_risk_level_serde() {
        assert_eq!(
            serde_json::from_str::<RiskLevel>(r#""medium""#).unwrap(),
            RiskLevel::Medium
        );
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), r#""high""#);
    }

    #[test]
    fn test_projection_deserialize() {
        let json = r#"{
            "id": "nba-1",
            "player_name": "LeBron James",
            "team": "LAL",
            "sport": "NBA",
            "league": "NBA",
            "stat_type": "Points",
            "line": 25.5,
            "confidence": 87.5,
            "odds": -115,
            "expected_value": 4.2,
            "kelly_pct": 2.5,
            "risk_level": "low",
            "recommendation": "OVER",
            "ml_prediction": {
                "predicted_value": 27.1,
                "win_probability": 0.64,
                "model": "xgb-4.2",
                "top_factors": ["recent_form"]
            },
            "fetched_at": "2025-06-01T12:00:00Z"
        }"#;
        let p: Projection = serde_json::from_str(json).unwrap();
        assert_eq!(p.player_name, "LeBron James");
        assert_eq!(p.line, dec!(25.5));
        assert_eq!(p.risk_level, Some(RiskLevel::Low));
        let ml = p.ml_prediction.unwrap();
        assert_eq!(ml.predicted_value, dec!(27.1));
        assert_eq!(ml.top_factors, vec!["recent_form".to_string()]);
    }

    #[test]
    fn test_expected_value_or_zero() {
        let json = r#"{
            "id": "p1", "player_name": "A", "team": "T", "sport": "NBA",
            "league": "NBA", "stat_type": "Points", "line": 10.5,
            "confidence": 70, "odds": null, "expected_value": null,
            "kelly_pct": null, "risk_level": null, "recommendation": null,
            "ml_prediction": null, "fetched_at": "2025-06-01T12:00:00Z"
        }"#;
        let p: Projection = serde_json::from_str(json).unwrap();
        assert_eq!(p.expected_value_or_zero(), rust_decimal::Decimal::ZERO);
    }

    #[test]
    fn test_player_matches_is_case_insensitive() {
        let json = r#"{
            "id": "p1", "player_name": "LeBron James", "team": "LAL",
            "sport": "NBA", "league": "NBA", "stat_type": "Points",
            "line": 25.5, "confidence": 80, "odds": null,
            "expected_value": null, "kelly_pct": null, "risk_level": null,
            "recommendation": null, "ml_prediction": null,
            "fetched_at": "2025-06-01T12:00:00Z"
        }"#;
        let p: Projection = serde_json::from_str(json).unwrap();
        assert!(p.player_matches("lebron"));
        assert!(p.player_matches("JAMES"));
        assert!(!p.player_matches("curry"));
    }
}
