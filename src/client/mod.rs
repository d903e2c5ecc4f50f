//! HTTP clients for the analytics backend

mod health;
mod props;

pub use health::HealthClient;
pub use props::PropsClient;

use crate::config::ApiConfig;
use crate::error::Result;
use std::time::Duration;

/// Bundle of per-concern API clients sharing one HTTP client
#[derive(Clone)]
pub struct ApiClient {
    pub props: PropsClient,
    pub health: HealthClient,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(Self {
            props: PropsClient::new(
                http.clone(),
                base_url.clone(),
                config.sport.clone(),
                config.min_confidence,
            ),
            health: HealthClient::new(http, base_url),
        })
    }
}
