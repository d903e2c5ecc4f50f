//! Bounded lineup selection set
//!
//! Holds the user's over/under picks. Invariants: never more than the
//! configured maximum number of entries, and at most one entry per
//! projection.


use crate::error::{BoardError, Result};
use crate::types::{Projection, Side};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_PICKS: usize = 6;

/// One active pick. Confidence and expected value are copied from the
/// projection at selection time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineupEntry {
    pub id: String,
    pub projection_id: String,
    pub player_name: String,
    pub stat_type: String,
    pub line: Decimal,
    pub side: Side,
    pub confidence: Decimal,
    pub expected_value: Decimal,
    pub selected_at: DateTime<Utc>,
}

/// What a select call did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectOutcome {
    /// New entry added
    Added,
    /// Opposite side for the same projection was replaced
    Replaced,
    /// Same side already selected; nothing changed
    AlreadySelected,
}

/// Size-bounded associative container of picks
#[derive(Debug, Clone)]
pub struct LineupBuilder {
    entries: Vec<LineupEntry>,
    max_picks: usize,
}

impl LineupBuilder {
    pub fn new(max_picks: usize) -> Self {
        Self {
            entries: Vec::with_capacity(max_picks),
            max_picks,
        }
    }

    /// Pick a side on a projection.
    ///
    /// Selecting the already-picked side is a no-op. Selecting the opposite
    /// side replaces the existing entry. A new projection is rejected when
    /// the lineup is at capacity.
    pub fn select(&mut self, projection: &Projection, side: Side) -> Result<SelectOutcome> {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|e| e.projection_id == projection.id)
        {
            if existing.side == side {
                return Ok(SelectOutcome::AlreadySelected);
            }
            *existing = Self::entry_for(projection, side);
            return Ok(SelectOutcome::Replaced);
        }

        if self.entries.len() >= self.max_picks {
            return Err(BoardError::LineupFull {
                max: self.max_picks,
            });
        }

        self.entries.push(Self::entry_for(projection, side));
        Ok(SelectOutcome::Added)
    }

    /// Remove an entry unconditionally. Returns whether anything was removed.
    pub fn deselect(&mut self, entry_id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != entry_id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The picked side for a projection, if any
    pub fn side_for(&self, projection_id: &str) -> Option<Side> {
        self.entries
            .iter()
            .find(|e| e.projection_id == projection_id)
            .map(|e| e.side)
    }

    pub fn entries(&self) -> &[LineupEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_picks(&self) -> usize {
        self.max_picks
    }

    fn entry_for(projection: &Projection, side: Side) -> LineupEntry {
        LineupEntry {
            id: uuid::Uuid::new_v4().to_string(),
            projection_id: projection.id.clone(),
            player_name: projection.player_name.clone(),
            stat_type: projection.stat_type.clone(),
            line: projection.line,
            side,
            confidence: projection.confidence,
            expected_value: projection.expected_value_or_zero(),
            selected_at: Utc::now(),
        }
    }
}

impl Default for LineupBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PICKS)
    }
}
