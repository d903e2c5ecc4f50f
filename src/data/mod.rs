//! Projection snapshot store and refresh loop
//!
//! The snapshot is replaced wholesale on every successful fetch. There is no
//! request sequencing: whichever response lands last wins. When the feed is
//! down and the board is empty, locally generated placeholder projections
//! keep the board usable.

mod placeholder;

pub use placeholder::sample_projections;

use crate::error::Result;
use crate::monitor::ErrorReporter;
use crate::types::Projection;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Trait for projection feeds
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropsSource: Send + Sync {
    async fn fetch_projections(&self) -> Result<Vec<Projection>>;

    /// Source name for logging
    fn name(&self) -> &str;
}

#[derive(Default)]
struct Inner {
    projections: Vec<Projection>,
    fetched_at: Option<DateTime<Utc>>,
    from_fallback: bool,
    refresh_count: u64,
    last_error: Option<String>,
}

/// Shared in-memory snapshot of the current projections
#[derive(Default)]
pub struct ProjectionStore {
    inner: RwLock<Inner>,
}

/// Store state for the board API
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    pub projection_count: usize,
    pub fetched_at: Option<DateTime<Utc>>,
    pub from_fallback: bool,
    pub refresh_count: u64,
    pub last_error: Option<String>,
}

impl ProjectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole snapshot
    pub fn replace_all(&self, projections: Vec<Projection>, from_fallback: bool) {
        let mut inner = self.inner.write();
        inner.projections = projections;
        inner.fetched_at = Some(Utc::now());
        inner.from_fallback = from_fallback;
        inner.refresh_count += 1;
        inner.last_error = None;
    }

    pub fn record_error(&self, message: String) {
        self.inner.write().last_error = Some(message);
    }

    pub fn projections(&self) -> Vec<Projection> {
        self.inner.read().projections.clone()
    }

    pub fn find(&self, projection_id: &str) -> Option<Projection> {
        self.inner
            .read()
            .projections
            .iter()
            .find(|p| p.id == projection_id)
            .cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().projections.is_empty()
    }

    pub fn status(&self) -> StoreStatus {
        let inner = self.inner.read();
        StoreStatus {
            projection_count: inner.projections.len(),
            fetched_at: inner.fetched_at,
            from_fallback: inner.from_fallback,
            refresh_count: inner.refresh_count,
            last_error: inner.last_error.clone(),
        }
    }
}

/// Background poll loop feeding the store
pub struct Refresher {
    source: Arc<dyn PropsSource>,
    store: Arc<ProjectionStore>,
    reporter: Arc<ErrorReporter>,
    interval: Duration,
    fallback_enabled: bool,
    fallback_count: usize,
}

impl Refresher {
    pub fn new(
        source: Arc<dyn PropsSource>,
        store: Arc<ProjectionStore>,
        reporter: Arc<ErrorReporter>,
        interval: Duration,
        fallback_enabled: bool,
        fallback_count: usize,
    ) -> Self {
        Self {
            source,
            store,
            reporter,
            interval,
            fallback_enabled,
            fallback_count,
        }
    }

    /// Poll forever. The first fetch happens immediately.
    pub async fn run(self) {
        info!(
            "Refreshing from {} every {:?}",
            self.source.name(),
            self.interval
        );
        let mut interval = tokio::time::interval(self.interval);
        loop {
            interval.tick().await;
            self.refresh_once().await;
        }
    }

    /// One fetch cycle: replace the snapshot on success; on failure record
    /// the error and, if the board is empty, fall back to placeholder data.
    pub async fn refresh_once(&self) {
        match self.source.fetch_projections().await {
            Ok(projections) => {
                info!("Refreshed {} projections", projections.len());
                self.store.replace_all(projections, false);
            }
            Err(e) => {
                let correlation_id = self.reporter.capture("fetch", &e.to_string());
                warn!(
                    "Projection fetch failed ({}): {}",
                    correlation_id, e
                );
                self.store.record_error(e.to_string());

                if self.fallback_enabled && self.store.is_empty() {
                    warn!(
                        "Board is empty, generating {} placeholder projections",
                        self.fallback_count
                    );
                    self.store
                        .replace_all(sample_projections(self.fallback_count), true);
                }
            }
        }
    }
}
