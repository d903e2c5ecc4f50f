//! Backend model health polling
//!
//! Polled on its own interval, independent of the projection refresh cycle.

use crate::client::HealthClient;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Model-readiness metadata from the backend health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelHealth {
    pub status: String,
    pub models_ready: bool,
    pub model_count: u32,
    /// Timestamp reported by the backend, if any
    pub reported_at: Option<DateTime<Utc>>,
    /// When we polled
    pub checked_at: DateTime<Utc>,
}

#[derive(Default)]
struct Inner {
    latest: Option<ModelHealth>,
    last_error: Option<String>,
}

/// Latest observed health, shared with the board API
#[derive(Default)]
pub struct HealthState {
    inner: RwLock<Inner>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthSnapshot {
    pub latest: Option<ModelHealth>,
    pub last_error: Option<String>,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, health: ModelHealth) {
        let mut inner = self.inner.write();
        inner.latest = Some(health);
        inner.last_error = None;
    }

    pub fn record_error(&self, message: String) {
        self.inner.write().last_error = Some(message);
    }

    pub fn latest(&self) -> Option<ModelHealth> {
        self.inner.read().latest.clone()
    }

    pub fn snapshot(&self) -> HealthSnapshot {
        let inner = self.inner.read();
        HealthSnapshot {
            latest: inner.latest.clone(),
            last_error: inner.last_error.clone(),
        }
    }
}

/// Background poll loop for the health endpoint
pub struct HealthPoller {
    client: HealthClient,
    state: Arc<HealthState>,
    interval: Duration,
}

impl HealthPoller {
    pub fn new(client: HealthClient, state: Arc<HealthState>, interval: Duration) -> Self {
        Self {
            client,
            state,
            interval,
        }
    }

    pub async fn run(self) {
        let mut interval = tokio::time::interval(self.interval);
        loop {
            interval.tick().await;
            match self.client.get_model_health().await {
                Ok(health) => {
                    debug!(
                        "Model health: {} ({} models, ready={})",
                        health.status, health.model_count, health.models_ready
                    );
                    self.state.set(health);
                }
                Err(e) => {
                    warn!("Health poll failed: {}", e);
                    self.state.record_error(e.to_string());
                }
            }
        }
    }
}
