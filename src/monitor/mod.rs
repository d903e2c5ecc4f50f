//! Diagnostics: error reports and the board API
//!
//! Failures are captured into a rolling in-memory window and forwarded to a
//! backend endpoint best-effort. Forwarding is fire-and-forget; a failed
//! report is dropped silently.

pub mod dashboard;

pub use dashboard::{create_router, start_dashboard, BoardState, EstimateStatus};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

/// One captured failure
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub correlation_id: String,
    pub timestamp: DateTime<Utc>,
    pub category: String,
    pub message: String,
}

/// Rolling window of recent error reports
pub struct ErrorLog {
    reports: Mutex<VecDeque<ErrorReport>>,
    max_reports: usize,
}

impl ErrorLog {
    pub fn new(max_reports: usize) -> Self {
        Self {
            reports: Mutex::new(VecDeque::with_capacity(max_reports)),
            max_reports,
        }
    }

    pub fn push(&self, report: ErrorReport) {
        let mut reports = self.reports.lock();
        if reports.len() >= self.max_reports {
            reports.pop_front();
        }
        reports.push_back(report);
    }

    /// Most recent first
    pub fn recent(&self) -> Vec<ErrorReport> {
        self.reports.lock().iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }
}

/// Captures failures with a correlation identifier
pub struct ErrorReporter {
    log: Arc<ErrorLog>,
    http: reqwest::Client,
    endpoint: Option<String>,
}

impl ErrorReporter {
    pub fn new(log: Arc<ErrorLog>, endpoint: Option<String>) -> Self {
        Self {
            log,
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Record a failure and forward it if an endpoint is configured.
    /// Returns the correlation identifier.
    pub fn capture(&self, category: &str, message: &str) -> String {
        let report = ErrorReport {
            correlation_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            category: category.to_string(),
            message: message.to_string(),
        };
        let correlation_id = report.correlation_id.clone();
        self.log.push(report.clone());

        if let Some(endpoint) = &self.endpoint {
            let http = self.http.clone();
            let endpoint = endpoint.clone();
            tokio::spawn(async move {
                // Failure to report is swallowed
                if let Err(e) = http.post(&endpoint).json(&report).send().await {
                    debug!("Error report dropped: {}", e);
                }
            });
        }

        correlation_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(n: usize) -> ErrorReport {
        ErrorReport {
            correlation_id: format!("c{}", n),
            timestamp: Utc::now(),
            category: "fetch".to_string(),
            message: format!("error {}", n),
        }
    }

    #[test]
    fn test_rolling_window_drops_oldest() {
        let log = ErrorLog::new(3);
        for n in 0..5 {
            log.push(report(n));
        }
        assert_eq!(log.len(), 3);

        let recent = log.recent();
        assert_eq!(recent[0].correlation_id, "c4");
        assert_eq!(recent[2].correlation_id, "c2");
    }

    #[test]
    fn test_recent_is_newest_first() {
        let log = ErrorLog::new(10);
        log.push(report(1));
        log.push(report(2));
        let recent = log.recent();
        assert_eq!(recent[0].correlation_id, "c2");
        assert_eq!(recent[1].correlation_id, "c1");
    }

    #[tokio::test]
    async fn test_capture_logs_with_correlation_id() {
        let log = Arc::new(ErrorLog::new(10));
        let reporter = ErrorReporter::new(log.clone(), None);

        let id = reporter.capture("fetch", "connection refused");
        assert!(!id.is_empty());

        let recent = log.recent();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].correlation_id, id);
        assert_eq!(recent[0].category, "fetch");
    }
}
