//! HTTP transport for registry requests

use crate::error::{BrewseError, BrewseResult};
use async_trait::async_trait;
use std::io::Read;
use std::time::Duration;
use tracing::debug;

/// Fetches raw response bodies from the registry
///
/// Implemented by `UreqTransport` for real requests; tests substitute
/// in-memory responses.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` and return the full response body
    async fn get(&self, url: &str) -> BrewseResult<Vec<u8>>;
}

/// Blocking `ureq` agent driven from tokio's blocking pool
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Create a transport whose requests each time out after `timeout`
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn get(&self, url: &str) -> BrewseResult<Vec<u8>> {
        let agent = self.agent.clone();
        let url = url.to_string();

        tokio::task::spawn_blocking(move || {
            debug!("GET {}", url);
            let network_error = |reason: String| BrewseError::Network {
                url: url.clone(),
                reason,
            };

            let response = agent
                .get(url.as_str())
                .call()
                .map_err(|e| network_error(e.to_string()))?;

            let mut body = Vec::new();
            response
                .into_body()
                .into_reader()
                .read_to_end(&mut body)
                .map_err(|e| network_error(e.to_string()))?;

            debug!("Received {} bytes from {}", body.len(), url);
            Ok(body)
        })
        .await
        .map_err(|e| BrewseError::Internal(format!("Request task failed: {}", e)))?
    }
}

/// Serves fixed bodies per URL; unknown URLs fail like an unreachable host
#[cfg(test)]
pub(crate) struct StaticTransport {
    bodies: std::collections::HashMap<String, String>,
    calls: std::sync::Arc<std::sync::atomic::AtomicUsize>,
}

#[cfg(test)]
impl StaticTransport {
    pub(crate) fn new(bodies: &[(&str, &str)]) -> Self {
        Self {
            bodies: bodies
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
            calls: Default::default(),
        }
    }

    /// Shared counter of requests made through this transport
    pub(crate) fn calls(&self) -> std::sync::Arc<std::sync::atomic::AtomicUsize> {
        std::sync::Arc::clone(&self.calls)
    }
}

#[cfg(test)]
#[async_trait]
impl Transport for StaticTransport {
    async fn get(&self, url: &str) -> BrewseResult<Vec<u8>> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.bodies
            .get(url)
            .map(|body| body.as_bytes().to_vec())
            .ok_or_else(|| BrewseError::Network {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            })
    }
}
