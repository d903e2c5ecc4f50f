//! Locally generated placeholder projections
//!
//! Used when the projection feed is unreachable and the board has nothing
//! to show. Values are plausible, not predictive.

use crate::types::{MlPrediction, Projection, RiskLevel};
use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;

const PLAYERS: &[(&str, &str, &str, &str)] = &[
    ("Aaron Judge", "NYY", "MLB", "Home Runs"),
    ("Mookie Betts", "LAD", "MLB", "Total Bases"),
    ("Ronald Acuna Jr.", "ATL", "MLB", "Stolen Bases"),
    ("Shohei Ohtani", "LAD", "MLB", "Hits"),
    ("LeBron James", "LAL", "NBA", "Points"),
    ("Nikola Jokic", "DEN", "NBA", "Rebounds"),
    ("Luka Doncic", "DAL", "NBA", "Assists"),
    ("Jayson Tatum", "BOS", "NBA", "Points"),
    ("A'ja Wilson", "LVA", "WNBA", "Points"),
    ("Breanna Stewart", "NYL", "WNBA", "Rebounds"),
    ("Patrick Mahomes", "KC", "NFL", "Passing Yards"),
    ("Josh Allen", "BUF", "NFL", "Passing TDs"),
];

/// Generate `count` placeholder projections
pub fn sample_projections(count: usize) -> Vec<Projection> {
    let mut rng = rand::rng();

    (0..count)
        .map(|i| {
            let (player, team, sport, stat) = PLAYERS[i % PLAYERS.len()];
            let line = Decimal::new(rng.random_range(5..455), 1);
            let confidence = Decimal::from(rng.random_range(55u32..97));
            let predicted = line + Decimal::new(rng.random_range(-30..31), 1);

            Projection {
                id: format!("sample-{}", i),
                player_name: player.to_string(),
                team: team.to_string(),
                sport: sport.to_string(),
                league: sport.to_string(),
                stat_type: stat.to_string(),
                line,
                confidence,
                odds: Some(Decimal::from(rng.random_range(-140i32..-100))),
                expected_value: Some(Decimal::new(rng.random_range(-30..80), 1)),
                kelly_pct: Some(Decimal::new(rng.random_range(5..40), 1)),
                risk_level: Some(match rng.random_range(0..3) {
                    0 => RiskLevel::Low,
                    1 => RiskLevel::Medium,
                    _ => RiskLevel::High,
                }),
                recommendation: None,
                ml_prediction: Some(MlPrediction {
                    predicted_value: predicted,
                    win_probability: Decimal::new(rng.random_range(50..80), 2),
                    model: Some("sample".to_string()),
                    top_factors: vec![
                        "recent_form".to_string(),
                        "matchup_advantage".to_string(),
                    ],
                }),
                fetched_at: Utc::now(),
            }
        })
        .collect()
}
