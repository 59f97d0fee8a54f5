//! HTTP implementation of [`QueueBackend`] using `reqwest`.

use reqwest::{Client, Url};
use tracing::{debug, warn};

use super::QueueBackend;
use super::types::CompletionRoute;
use crate::config::BackendConfig;
use crate::errors::{CompletionError, ConfigError, FetchError};
use crate::orders::Order;

/// Client for the backend order-queue service.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct HttpQueueClient {
    client: Client,
    base_url: Url,
    route: CompletionRoute,
}

impl HttpQueueClient {
    /// Build a client from backend configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidConfiguration` if the base URL cannot be
    /// parsed or the HTTP client cannot be constructed.
    pub fn new(backend: &BackendConfig) -> Result<Self, ConfigError> {
        let base_url = Url::parse(backend.base_url()).map_err(|e| {
            ConfigError::InvalidConfiguration {
                message: format!("Invalid base_url '{}': {}", backend.base_url(), e),
            }
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidConfiguration {
                message: format!("Invalid base_url '{}': not a base URL", backend.base_url()),
            });
        }

        let client = Client::builder()
            .timeout(backend.request_timeout())
            .build()
            .map_err(|e| ConfigError::InvalidConfiguration {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url,
            route: backend.completion_route(),
        })
    }

    pub fn route(&self) -> CompletionRoute {
        self.route
    }

    /// `{base}/queue`
    pub fn queue_url(&self) -> Url {
        self.endpoint(&["queue"])
    }

    /// URL of the completion endpoint for `order_id` under the configured route.
    ///
    /// The id is percent-encoded as a single path segment.
    pub fn completion_url(&self, order_id: &str) -> Url {
        match self.route {
            CompletionRoute::Complete => self.endpoint(&["complete", order_id]),
            CompletionRoute::UpdateStatus => {
                let mut url = self.endpoint(&["update_status", order_id]);
                url.query_pairs_mut().append_pair("status", "ready");
                url
            }
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL always has path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl QueueBackend for HttpQueueClient {
    async fn fetch_queue(&self) -> Result<Vec<Order>, FetchError> {
        let url = self.queue_url();
        debug!(event = "core.client.fetch_queue_started", url = %url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(
                event = "core.client.fetch_queue_bad_status",
                status = status.as_u16()
            );
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let orders: Vec<Order> =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
                message: e.to_string(),
            })?;

        debug!(
            event = "core.client.fetch_queue_completed",
            order_count = orders.len()
        );
        Ok(orders)
    }

    async fn complete_order(&self, order_id: &str) -> Result<(), CompletionError> {
        let url = self.completion_url(order_id);
        debug!(
            event = "core.client.complete_order_started",
            order_id = order_id,
            url = %url
        );

        let response = self.client.post(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::Status {
                order_id: order_id.to_string(),
                status: status.as_u16(),
            });
        }

        debug!(event = "core.client.complete_order_completed", order_id = order_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str, route: CompletionRoute) -> HttpQueueClient {
        HttpQueueClient::new(&BackendConfig {
            base_url: Some(base_url.to_string()),
            completion_route: Some(route),
            request_timeout_ms: None,
        })
        .unwrap()
    }

    #[test]
    fn test_queue_url() {
        let c = client("http://localhost:8000", CompletionRoute::Complete);
        assert_eq!(c.queue_url().as_str(), "http://localhost:8000/queue");
    }

    #[test]
    fn test_queue_url_keeps_base_path() {
        let c = client("http://kitchen.local/api/", CompletionRoute::Complete);
        assert_eq!(c.queue_url().as_str(), "http://kitchen.local/api/queue");
    }

    #[test]
    fn test_complete_route_url() {
        let c = client("http://localhost:8000", CompletionRoute::Complete);
        assert_eq!(
            c.completion_url("a1").as_str(),
            "http://localhost:8000/complete/a1"
        );
    }

    #[test]
    fn test_update_status_route_url() {
        let c = client("http://localhost:8000", CompletionRoute::UpdateStatus);
        assert_eq!(
            c.completion_url("a1").as_str(),
            "http://localhost:8000/update_status/a1?status=ready"
        );
    }

    #[test]
    fn test_order_id_is_escaped() {
        let c = client("http://localhost:8000", CompletionRoute::Complete);
        assert_eq!(
            c.completion_url("a/b c").as_str(),
            "http://localhost:8000/complete/a%2Fb%20c"
        );
    }

    #[test]
    fn test_unparseable_base_url_rejected() {
        let result = HttpQueueClient::new(&BackendConfig {
            base_url: Some("http://".to_string()),
            ..Default::default()
        });
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidConfiguration { .. }
        ));
    }
}
