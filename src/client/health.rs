//! Model health endpoint client

use crate::error::Result;
use crate::health::ModelHealth;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Clone)]
pub struct HealthClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct RawHealth {
    status: Option<String>,
    #[serde(alias = "models_ready")]
    ready: Option<bool>,
    model_count: Option<u32>,
    #[serde(alias = "last_updated")]
    timestamp: Option<DateTime<Utc>>,
}

impl HealthClient {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Get model-readiness metadata from the backend health check
    pub async fn get_model_health(&self) -> Result<ModelHealth> {
        let url = format!("{}/api/prizepicks/health", self.base_url);
        let raw: RawHealth = self.http.get(&url).send().await?.json().await?;

        Ok(ModelHealth {
            status: raw.status.unwrap_or_else(|| "unknown".to_string()),
            models_ready: raw.ready.unwrap_or(false),
            model_count: raw.model_count.unwrap_or(0),
            reported_at: raw.timestamp,
            checked_at: Utc::now(),
        })
    }
}
