//! Configuration loading

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub lineup: LineupConfig,
    #[serde(default)]
    pub payout: PayoutConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl Config {
    /// Load from a TOML file, overlaid with `PROPBOARD__*` environment
    /// variables. A missing file yields the defaults.
    pub fn load(path: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::from(Path::new(path)).required(false))
            .add_source(
                config::Environment::with_prefix("PROPBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(cfg.try_deserialize()?)
    }
}

/// Backend API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the analytics backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP client timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Server-side sport filter passed to the props endpoint
    #[serde(default)]
    pub sport: Option<String>,

    /// Server-side confidence floor passed to the props endpoint
    #[serde(default = "default_min_confidence")]
    pub min_confidence: Option<u32>,
}

/// Refresh behavior for the projection snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Projection refresh interval in seconds
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Model health poll interval in seconds, independent of refresh
    #[serde(default = "default_health_interval")]
    pub health_interval_secs: u64,

    /// Generate placeholder projections when the feed is down and the
    /// board is empty
    #[serde(default = "default_true")]
    pub fallback_enabled: bool,

    /// How many placeholder projections to generate
    #[serde(default = "default_fallback_count")]
    pub fallback_count: usize,
}

/// Lineup bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineupConfig {
    /// Maximum number of picks in a lineup
    #[serde(default = "default_max_picks")]
    pub max_picks: usize,

    /// Minimum picks required before a payout estimate runs
    #[serde(default = "default_min_picks")]
    pub min_picks: usize,
}

/// Payout estimator tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutConfig {
    /// Artificial compute delay in milliseconds, emulating a backend call
    #[serde(default = "default_compute_delay")]
    pub compute_delay_ms: u64,
}

/// Local board API server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Error report retention and forwarding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Rolling window of retained error reports
    #[serde(default = "default_max_reports")]
    pub max_reports: usize,

    /// Backend endpoint for best-effort error forwarding
    #[serde(default)]
    pub report_endpoint: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_min_confidence() -> Option<u32> {
    Some(70)
}

fn default_refresh_interval() -> u64 {
    30
}

fn default_health_interval() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_fallback_count() -> usize {
    20
}

fn default_max_picks() -> usize {
    6
}

fn default_min_picks() -> usize {
    2
}

fn default_compute_delay() -> u64 {
    1500
}

fn default_port() -> u16 {
    8787
}

fn default_max_reports() -> usize {
    50
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            sport: None,
            min_confidence: default_min_confidence(),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            health_interval_secs: default_health_interval(),
            fallback_enabled: default_true(),
            fallback_count: default_fallback_count(),
        }
    }
}

impl Default for LineupConfig {
    fn default() -> Self {
        Self {
            max_picks: default_max_picks(),
            min_picks: default_min_picks(),
        }
    }
}

impl Default for PayoutConfig {
    fn default() -> Self {
        Self {
            compute_delay_ms: default_compute_delay(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            port: default_port(),
        }
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            max_reports: default_max_reports(),
            report_endpoint: None,
        }
    }
}
