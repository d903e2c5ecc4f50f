//! Board HTTP API
//!
//! Serves the current projection snapshot, the lineup, and payout estimates
//! over HTTP. This is the surface the dashboard UI talks to.

use crate::board::{filter_and_sort, ProjectionFilter, SortDirection, SortKey};
use crate::data::{ProjectionStore, StoreStatus};
use crate::error::BoardError;
use crate::health::{HealthSnapshot, HealthState};
use crate::lineup::{LineupBuilder, LineupEntry, SelectOutcome};
use crate::monitor::{ErrorLog, ErrorReport};
use crate::payout::{OptimizedLineup, PayoutEstimator};
use crate::types::{Projection, Side};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared state behind the board API
pub struct BoardState {
    pub store: Arc<ProjectionStore>,
    pub health: Arc<HealthState>,
    pub errors: Arc<ErrorLog>,
    lineup: RwLock<LineupBuilder>,
    estimate: RwLock<EstimateStatus>,
    estimator: PayoutEstimator,
}

/// Estimate lifecycle: idle until a computation starts, then the result
/// stays displayed until the next run
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EstimateStatus {
    Idle,
    Computing,
    Ready(OptimizedLineup),
}

impl BoardState {
    pub fn new(
        store: Arc<ProjectionStore>,
        health: Arc<HealthState>,
        errors: Arc<ErrorLog>,
        lineup: LineupBuilder,
        estimator: PayoutEstimator,
    ) -> Self {
        Self {
            store,
            health,
            errors,
            lineup: RwLock::new(lineup),
            estimate: RwLock::new(EstimateStatus::Idle),
            estimator,
        }
    }

    /// Pick a side on a projection from the current snapshot
    pub async fn select_pick(
        &self,
        projection_id: &str,
        side: Side,
    ) -> crate::error::Result<SelectOutcome> {
        let projection = self
            .store
            .find(projection_id)
            .ok_or_else(|| BoardError::ProjectionNotFound(projection_id.to_string()))?;

        self.lineup.write().await.select(&projection, side)
    }

    pub async fn remove_pick(&self, entry_id: &str) -> bool {
        self.lineup.write().await.deselect(entry_id)
    }

    pub async fn lineup_entries(&self) -> Vec<LineupEntry> {
        self.lineup.read().await.entries().to_vec()
    }

    pub async fn lineup_max_picks(&self) -> usize {
        self.lineup.read().await.max_picks()
    }

    /// Run the payout estimator over the current lineup. Below the minimum
    /// pick count nothing runs and the estimate state is untouched.
    pub async fn optimize(&self) -> Option<OptimizedLineup> {
        let entries = self.lineup.read().await.entries().to_vec();
        if entries.len() < self.estimator.min_picks() {
            return None;
        }

        *self.estimate.write().await = EstimateStatus::Computing;
        // The estimator re-checks the minimum; entries were already counted
        let result = self.estimator.estimate(&entries).await?;
        *self.estimate.write().await = EstimateStatus::Ready(result.clone());
        Some(result)
    }

    pub async fn estimate_status(&self) -> EstimateStatus {
        self.estimate.read().await.clone()
    }

    pub fn min_picks(&self) -> usize {
        self.estimator.min_picks()
    }
}

// ============ HTTP API Handlers ============

#[derive(Debug, Default, Deserialize)]
struct BoardParams {
    sport: Option<String>,
    league: Option<String>,
    team: Option<String>,
    stat_type: Option<String>,
    min_confidence: Option<Decimal>,
    search: Option<String>,
    sort: Option<SortKey>,
    direction: Option<SortDirection>,
}

impl BoardParams {
    fn filter(&self) -> ProjectionFilter {
        ProjectionFilter {
            sport: self.sport.clone(),
            league: self.league.clone(),
            team: self.team.clone(),
            stat_type: self.stat_type.clone(),
            min_confidence: self.min_confidence,
            player_search: self.search.clone(),
        }
    }
}

/// Liveness check
async fn health_check() -> &'static str {
    "OK"
}

/// Filtered, sorted view of the current projections
async fn get_props(
    State(state): State<Arc<BoardState>>,
    Query(params): Query<BoardParams>,
) -> Json<Vec<Projection>> {
    let projections = state.store.projections();
    let out = filter_and_sort(
        &projections,
        &params.filter(),
        params.sort.unwrap_or_default(),
        params.direction.unwrap_or_default(),
    );
    Json(out)
}

async fn get_board_status(State(state): State<Arc<BoardState>>) -> Json<StoreStatus> {
    Json(state.store.status())
}

#[derive(Serialize)]
struct LineupView {
    entries: Vec<LineupEntry>,
    max_picks: usize,
}

async fn get_lineup(State(state): State<Arc<BoardState>>) -> Json<LineupView> {
    Json(LineupView {
        entries: state.lineup_entries().await,
        max_picks: state.lineup_max_picks().await,
    })
}

#[derive(Deserialize)]
struct SelectRequest {
    projection_id: String,
    side: Side,
}

async fn select_pick(
    State(state): State<Arc<BoardState>>,
    Json(req): Json<SelectRequest>,
) -> impl IntoResponse {
    match state.select_pick(&req.projection_id, req.side).await {
        Ok(outcome) => {
            let entry_count = state.lineup_entries().await.len();
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "outcome": outcome,
                    "entry_count": entry_count,
                })),
            )
        }
        Err(e @ BoardError::ProjectionNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
        Err(e @ BoardError::LineupFull { .. }) => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
    }
}

async fn deselect_pick(
    State(state): State<Arc<BoardState>>,
    Path(entry_id): Path<String>,
) -> StatusCode {
    if state.remove_pick(&entry_id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn optimize_lineup(State(state): State<Arc<BoardState>>) -> impl IntoResponse {
    match state.optimize().await {
        Some(result) => (StatusCode::OK, Json(serde_json::json!(result))),
        None => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({
                "error": format!(
                    "Pick at least {} projections to estimate a payout",
                    state.min_picks()
                )
            })),
        ),
    }
}

async fn get_estimate(State(state): State<Arc<BoardState>>) -> Json<EstimateStatus> {
    Json(state.estimate_status().await)
}

async fn get_model_health(State(state): State<Arc<BoardState>>) -> Json<HealthSnapshot> {
    Json(state.health.snapshot())
}

async fn get_errors(State(state): State<Arc<BoardState>>) -> Json<Vec<ErrorReport>> {
    Json(state.errors.recent())
}

#[derive(Serialize)]
struct BoardSummary {
    store: StoreStatus,
    lineup_count: usize,
    estimate: EstimateStatus,
    health: HealthSnapshot,
    error_count: usize,
}

async fn get_summary(State(state): State<Arc<BoardState>>) -> Json<BoardSummary> {
    Json(BoardSummary {
        store: state.store.status(),
        lineup_count: state.lineup_entries().await.len(),
        estimate: state.estimate_status().await,
        health: state.health.snapshot(),
        error_count: state.errors.len(),
    })
}

/// Create the board API router
pub fn create_router(state: Arc<BoardState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/props", get(get_props))
        .route("/api/board/status", get(get_board_status))
        .route("/api/lineup", get(get_lineup))
        .route("/api/lineup/select", post(select_pick))
        .route("/api/lineup/{entry_id}", delete(deselect_pick))
        .route("/api/lineup/optimize", post(optimize_lineup))
        .route("/api/lineup/estimate", get(get_estimate))
        .route("/api/models/health", get(get_model_health))
        .route("/api/errors", get(get_errors))
        .route("/api/summary", get(get_summary))
        .with_state(state)
}

/// Start the board API server
pub async fn start_dashboard(
    state: Arc<BoardState>,
    port: u16,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Board API starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_projections;
    use crate::types::Projection;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn projection(id: &str, confidence: Decimal) -> Projection {
        Projection {
            id: id.to_string(),
            player_name: format!("Player {}", id),
            team: "LAL".to_string(),
            sport: "NBA".to_string(),
            league: "NBA".to_string(),
            stat_type: "Points".to_string(),
            line: dec!(24.5),
            confidence,
            odds: None,
            expected_value: Some(dec!(2.0)),
            kelly_pct: None,
            risk_level: None,
            recommendation: None,
            ml_prediction: None,
            fetched_at: Utc::now(),
        }
    }

    fn board_state(projections: Vec<Projection>) -> Arc<BoardState> {
        let store = Arc::new(ProjectionStore::new());
        store.replace_all(projections, false);
        Arc::new(BoardState::new(
            store,
            Arc::new(HealthState::new()),
            Arc::new(ErrorLog::new(10)),
            LineupBuilder::new(6),
            PayoutEstimator::new(Duration::ZERO),
        ))
    }

    #[tokio::test]
    async fn test_select_unknown_projection() {
        let state = board_state(vec![projection("p1", dec!(80))]);
        let err = state.select_pick("missing", Side::Over).await.unwrap_err();
        assert!(matches!(err, BoardError::ProjectionNotFound(_)));
    }

    #[tokio::test]
    async fn test_select_and_remove_round_trip() {
        let state = board_state(vec![projection("p1", dec!(80))]);

        let outcome = state.select_pick("p1", Side::Over).await.unwrap();
        assert_eq!(outcome, SelectOutcome::Added);

        let entries = state.lineup_entries().await;
        assert_eq!(entries.len(), 1);

        assert!(state.remove_pick(&entries[0].id).await);
        assert!(state.lineup_entries().await.is_empty());
    }

    #[tokio::test]
    async fn test_optimize_below_minimum_keeps_state_idle() {
        let state = board_state(vec![projection("p1", dec!(80))]);
        state.select_pick("p1", Side::Over).await.unwrap();

        assert!(state.optimize().await.is_none());
        assert!(matches!(
            state.estimate_status().await,
            EstimateStatus::Idle
        ));
    }

    #[tokio::test]
    async fn test_optimize_two_picks() {
        let state = board_state(vec![
            projection("p1", dec!(80)),
            projection("p2", dec!(90)),
        ]);
        state.select_pick("p1", Side::Over).await.unwrap();
        state.select_pick("p2", Side::Under).await.unwrap();

        let result = state.optimize().await.unwrap();
        assert_eq!(result.average_confidence, dec!(85));
        assert_eq!(result.multiplier, dec!(3.0));
        assert_eq!(result.risk_score, dec!(15));

        assert!(matches!(
            state.estimate_status().await,
            EstimateStatus::Ready(_)
        ));
    }

    #[tokio::test]
    async fn test_optimize_recomputes_each_invocation() {
        let state = board_state(vec![
            projection("p1", dec!(80)),
            projection("p2", dec!(90)),
            projection("p3", dec!(70)),
        ]);
        state.select_pick("p1", Side::Over).await.unwrap();
        state.select_pick("p2", Side::Under).await.unwrap();
        let first = state.optimize().await.unwrap();
        assert_eq!(first.multiplier, dec!(3.0));

        state.select_pick("p3", Side::Over).await.unwrap();
        let second = state.optimize().await.unwrap();
        assert_eq!(second.multiplier, dec!(5.0));
        assert_eq!(second.entry_count, 3);
    }

    #[tokio::test]
    async fn test_board_params_build_filter() {
        let params = BoardParams {
            sport: Some("NBA".to_string()),
            min_confidence: Some(dec!(70)),
            search: Some("james".to_string()),
            ..Default::default()
        };
        let filter = params.filter();
        assert_eq!(filter.sport.as_deref(), Some("NBA"));
        assert_eq!(filter.min_confidence, Some(dec!(70)));
        assert_eq!(filter.player_search.as_deref(), Some("james"));
    }

    #[tokio::test]
    async fn test_summary_reflects_fallback_snapshot() {
        let state = board_state(sample_projections(5));
        let status = state.store.status();
        assert_eq!(status.projection_count, 5);
    }
}
