//! Payout estimation for a lineup
//!
//! The multiplier comes from a fixed table keyed by pick count; the rest of
//! the result is aggregate display data. The computation runs behind an
//! artificial delay emulating a backend call.


use crate::lineup::LineupEntry;
use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_COMPUTE_DELAY: Duration = Duration::from_millis(1500);

/// Minimum picks before an estimate runs
pub const MIN_PICKS: usize = 2;

/// Fixed payout multiplier by pick count. Counts above six clamp to the
/// top bucket.
pub fn multiplier_for(count: usize) -> Decimal {
    match count {
        0 | 1 => Decimal::ZERO,
        2 => dec!(3.0),
        3 => dec!(5.0),
        4 => dec!(10.0),
        5 => dec!(20.0),
        _ => dec!(25.0),
    }
}

/// Aggregate estimate for the current lineup. Ephemeral; recomputed on
/// every invocation and never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizedLineup {
    pub entry_count: usize,
    /// Mean of the entries' confidences, 0-100
    pub average_confidence: Decimal,
    pub multiplier: Decimal,
    /// 100 minus the average confidence
    pub risk_score: Decimal,
    /// Mean of the entries' stored expected values
    pub value_score: Decimal,
    /// Random values, display only
    pub correlation_matrix: Vec<Vec<f64>>,
    pub computed_at: DateTime<Utc>,
}

pub struct PayoutEstimator {
    compute_delay: Duration,
    min_picks: usize,
}

impl PayoutEstimator {
    pub fn new(compute_delay: Duration) -> Self {
        Self {
            compute_delay,
            min_picks: MIN_PICKS,
        }
    }

    pub fn with_min_picks(mut self, min_picks: usize) -> Self {
        self.min_picks = min_picks;
        self
    }

    pub fn min_picks(&self) -> usize {
        self.min_picks
    }

    /// Estimate the payout for the given entries. Fewer than the minimum
    /// picks is a no-op and returns `None`.
    pub async fn estimate(&self, entries: &[LineupEntry]) -> Option<OptimizedLineup> {
        if entries.len() < self.min_picks {
            return None;
        }

        if !self.compute_delay.is_zero() {
            tokio::time::sleep(self.compute_delay).await;
        }

        let count = Decimal::from(entries.len());
        let average_confidence =
            entries.iter().map(|e| e.confidence).sum::<Decimal>() / count;
        let value_score =
            entries.iter().map(|e| e.expected_value).sum::<Decimal>() / count;

        Some(OptimizedLineup {
            entry_count: entries.len(),
            average_confidence,
            multiplier: multiplier_for(entries.len()),
            risk_score: Decimal::ONE_HUNDRED - average_confidence,
            value_score,
            correlation_matrix: correlation_matrix(entries.len()),
            computed_at: Utc::now(),
        })
    }
}

impl Default for PayoutEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_COMPUTE_DELAY)
    }
}

/// Symmetric n-by-n matrix of random values with a unit diagonal
fn correlation_matrix(n: usize) -> Vec<Vec<f64>> {
    let mut rng = rand::rng();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let value = rng.random_range(-0.25..0.75);
            matrix[i][j] = value;
            matrix[j][i] = value;
        }
    }
    matrix
}
