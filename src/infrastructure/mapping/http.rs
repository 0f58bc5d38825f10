//! HTTP client for the mapping service's driving-direction endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::application::ports::{RouteProvider, RouteRequest};
use crate::domain::{DomainResult, PricingError, TripDistanceDuration};

/// Default base URL for a locally running mapping service.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8085";

/// Envelope code the mapping service uses for success.
const SUCCESS_CODE: i32 = 1;

/// Configuration for the mapping client.
#[derive(Debug, Clone)]
pub struct MappingConfig {
    /// Base URL of the mapping service
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 5,
        }
    }
}

impl MappingConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    code: i32,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<DirectionData>,
}

#[derive(Debug, Deserialize)]
struct DirectionData {
    /// Metres
    distance: Option<i64>,
    /// Seconds
    duration: Option<i64>,
}

fn mapping_err(message: impl Into<String>, transient: bool) -> PricingError {
    PricingError::Mapping {
        message: message.into(),
        transient,
    }
}

impl From<reqwest::Error> for PricingError {
    fn from(e: reqwest::Error) -> Self {
        let transient = e.is_timeout() || e.is_connect() || e.is_request();
        mapping_err(e.to_string(), transient)
    }
}

/// Mapping service client.
#[derive(Debug, Clone)]
pub struct HttpRouteProvider {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRouteProvider {
    pub fn new(config: MappingConfig) -> DomainResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RouteProvider for HttpRouteProvider {
    async fn direction(&self, route: &RouteRequest) -> DomainResult<TripDistanceDuration> {
        let url = format!("{}/direction/driving", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("depLongitude", route.dep_longitude.as_str()),
                ("depLatitude", route.dep_latitude.as_str()),
                ("destLongitude", route.dest_longitude.as_str()),
                ("destLatitude", route.dest_latitude.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(mapping_err(
                format!("mapping service returned {}: {}", status.as_u16(), body),
                status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS,
            ));
        }

        let body = response.text().await?;
        let envelope: Envelope = serde_json::from_str(&body).map_err(|e| {
            let snippet: String = body.chars().take(200).collect();
            mapping_err(format!("invalid mapping response ({}): {}", e, snippet), false)
        })?;

        if envelope.code != SUCCESS_CODE {
            return Err(mapping_err(
                format!(
                    "mapping service rejected route (code {}): {}",
                    envelope.code,
                    envelope.message.unwrap_or_default()
                ),
                false,
            ));
        }

        let data = envelope
            .data
            .ok_or_else(|| mapping_err("mapping response has no data", false))?;
        let (distance, duration) = match (data.distance, data.duration) {
            (Some(distance), Some(duration)) => (distance, duration),
            _ => return Err(mapping_err("mapping response lacks distance or duration", false)),
        };

        debug!(distance, duration, "Direction resolved");
        TripDistanceDuration::new(distance, duration).map_err(|e| {
            mapping_err(format!("mapping service returned an impossible trip: {}", e), false)
        })
    }
}
