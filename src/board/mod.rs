//! Projection board filtering and sorting
//!
//! A pure pipeline over the current projection snapshot: a conjunction of
//! equality and threshold predicates followed by a single-key sort.

use crate::types::Projection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Active predicates; `None` fields are inactive
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionFilter {
    pub sport: Option<String>,
    pub league: Option<String>,
    pub team: Option<String>,
    pub stat_type: Option<String>,
    /// Minimum confidence, 0-100
    pub min_confidence: Option<Decimal>,
    /// Case-insensitive substring match on player name
    pub player_search: Option<String>,
}

impl ProjectionFilter {
    /// True when every active predicate holds
    pub fn matches(&self, p: &Projection) -> bool {
        if let Some(sport) = &self.sport {
            if !p.sport.eq_ignore_ascii_case(sport) {
                return false;
            }
        }
        if let Some(league) = &self.league {
            if !p.league.eq_ignore_ascii_case(league) {
                return false;
            }
        }
        if let Some(team) = &self.team {
            if !p.team.eq_ignore_ascii_case(team) {
                return false;
            }
        }
        if let Some(stat) = &self.stat_type {
            if !p.stat_type.eq_ignore_ascii_case(stat) {
                return false;
            }
        }
        if let Some(min) = self.min_confidence {
            if p.confidence < min {
                return false;
            }
        }
        if let Some(needle) = &self.player_search {
            if !needle.is_empty() && !p.player_matches(needle) {
                return false;
            }
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.sport.is_none()
            && self.league.is_none()
            && self.team.is_none()
            && self.stat_type.is_none()
            && self.min_confidence.is_none()
            && self.player_search.is_none()
    }
}

/// Sortable columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    PlayerName,
    Team,
    StatType,
    Line,
    Confidence,
    ExpectedValue,
    KellyPct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Confidence
    }
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Desc
    }
}

fn compare(a: &Projection, b: &Projection, key: SortKey) -> Ordering {
    // Missing numeric values sort as zero
    match key {
        SortKey::PlayerName => a.player_name.cmp(&b.player_name),
        SortKey::Team => a.team.cmp(&b.team),
        SortKey::StatType => a.stat_type.cmp(&b.stat_type),
        SortKey::Line => a.line.cmp(&b.line),
        SortKey::Confidence => a.confidence.cmp(&b.confidence),
        SortKey::ExpectedValue => a
            .expected_value
            .unwrap_or(Decimal::ZERO)
            .cmp(&b.expected_value.unwrap_or(Decimal::ZERO)),
        SortKey::KellyPct => a
            .kelly_pct
            .unwrap_or(Decimal::ZERO)
            .cmp(&b.kelly_pct.unwrap_or(Decimal::ZERO)),
    }
}

/// Apply the filter then sort by a single key. Returns a new list; the
/// input is untouched. No matches yields an empty list.
pub fn filter_and_sort(
    projections: &[Projection],
    filter: &ProjectionFilter,
    key: SortKey,
    direction: SortDirection,
) -> Vec<Projection> {
    let mut out: Vec<Projection> = projections
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect();

    out.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    out
}
