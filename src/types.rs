//! Core domain types shared across the board

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which side of the line a pick is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Over,
    Under,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Over => Side::Under,
            Side::Under => Side::Over,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Over => write!(f, "over"),
            Side::Under => write!(f, "under"),
        }
    }
}

/// Risk bucket carried through from the projection feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// A single player-stat projection offered for over/under selection.
///
/// Immutable once fetched; the whole snapshot is replaced on refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    pub id: String,
    pub player_name: String,
    pub team: String,
    pub sport: String,
    pub league: String,
    pub stat_type: String,
    /// The offered line (e.g. 24.5 points)
    pub line: Decimal,
    /// Model confidence, 0-100
    pub confidence: Decimal,
    pub odds: Option<Decimal>,
    /// Expected value of the pick, percentage points
    pub expected_value: Option<Decimal>,
    /// Suggested staking size carried through from the feed
    pub kelly_pct: Option<Decimal>,
    pub risk_level: Option<RiskLevel>,
    pub recommendation: Option<String>,
    /// Display-only model output attached by the feed
    pub ml_prediction: Option<MlPrediction>,
    pub fetched_at: DateTime<Utc>,
}

impl Projection {
    /// Expected value with missing values coerced to zero
    pub fn expected_value_or_zero(&self) -> Decimal {
        self.expected_value.unwrap_or(Decimal::ZERO)
    }

    /// Case-insensitive player name match
    pub fn player_matches(&self, needle: &str) -> bool {
        self.player_name
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}

/// Display data produced by the backend ensemble, not a model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MlPrediction {
    /// Predicted stat value
    pub predicted_value: Decimal,
    /// Win probability for the recommended side, 0-1
    pub win_probability: Decimal,
    pub model: Option<String>,
    #[serde(default)]
    pub top_factors: Vec<String>,
}
