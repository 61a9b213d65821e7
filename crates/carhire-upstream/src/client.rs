//! HTTP client for the search provider

use async_trait::async_trait;
use carhire_core::{
    models::{SearchOffer, SearchQuery},
    traits::SearchProvider,
    AppError, AppResult,
};
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::normalize::normalize_search_result;

/// Search provider reached over HTTP
pub struct HttpSearchProvider {
    http_client: Client,
    endpoint: String,
}

impl HttpSearchProvider {
    /// Create a new provider client
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Search URL (e.g. "http://search.internal/api/cars")
    /// * `timeout_ms` - Request timeout in milliseconds
    pub fn new(endpoint: &str, timeout_ms: u64) -> AppResult<Self> {
        let http_client = ClientBuilder::new()
            .timeout(Duration::from_millis(timeout_ms))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| AppError::Config(format!("cannot build search client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.to_string(),
        })
    }

    fn unavailable(&self, reason: impl Into<String>) -> AppError {
        AppError::UpstreamUnavailable {
            endpoint: self.endpoint.clone(),
            reason: reason.into(),
        }
    }
}

/// Result items, either a bare array or wrapped in `results`
fn extract_items(body: Value) -> Option<Vec<Value>> {
    match body {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    }
}

/// Normalize every item, skipping the ones that cannot be priced
fn normalize_items(items: &[Value]) -> Vec<SearchOffer> {
    items
        .iter()
        .filter_map(|item| match normalize_search_result(item) {
            Ok(offer) => Some(offer),
            Err(e) => {
                warn!(error = %e, "Skipping search result");
                None
            }
        })
        .collect()
}

#[async_trait]
impl SearchProvider for HttpSearchProvider {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn search(&self, query: &SearchQuery) -> AppResult<Vec<SearchOffer>> {
        let pickup_date = query.pickup_date.to_string();
        let dropoff_date = query.dropoff_date.to_string();

        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[
                ("pickupCode", query.pickup_code.as_str()),
                ("dropoffCode", query.dropoff_code.as_str()),
                ("pickupDate", pickup_date.as_str()),
                ("dropoffDate", dropoff_date.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Search request failed");
                if e.is_timeout() {
                    self.unavailable("request timed out")
                } else {
                    self.unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "Search provider returned an error status");
            return Err(self.unavailable(format!("HTTP status {}", status.as_u16())));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| self.unavailable(format!("invalid response body: {}", e)))?;

        let items = extract_items(body)
            .ok_or_else(|| self.unavailable("response is not a list of results"))?;
        debug!(received = items.len(), "Search response received");

        let offers = normalize_items(&items);
        info!(
            pickup = %query.pickup_code,
            received = items.len(),
            offers = offers.len(),
            "Search completed"
        );

        Ok(offers)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
