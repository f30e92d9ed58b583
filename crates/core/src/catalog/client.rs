//! # Catalog Client
//!
//! Issues GETs against the catalog and normalizes every failure into a
//! [`CatalogError`]. No retries, no caching.
//!
//! The network sits behind [`CatalogTransport`] so resolvers can be driven
//! by an in-memory catalog in tests.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use super::error::{CatalogError, CatalogResult};
use crate::config::CatalogConfig;

/// Fetches a URL and returns its JSON body
///
/// Implementations must map a 404 to `NotFound`, other non-2xx statuses and
/// transport failures to `Upstream`, and an unparsable body to
/// `MalformedResponse`.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    async fn get_json(&self, url: &str) -> CatalogResult<serde_json::Value>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| CatalogError::transport(config.base_url.clone(), e))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    async fn get_json(&self, url: &str) -> CatalogResult<serde_json::Value> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::from_status(url, status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::transport(url, e))?;
        serde_json::from_str(&body).map_err(|e| CatalogError::malformed(url, e))
    }
}

/// Read-only handle on the catalog
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct CatalogClient {
    base_url: Arc<str>,
    transport: Arc<dyn CatalogTransport>,
}

impl CatalogClient {
    /// Client over HTTP for the configured endpoint
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(
            config.normalized_base_url(),
            Arc::new(transport),
        ))
    }

    pub fn with_transport(base_url: &str, transport: Arc<dyn CatalogTransport>) -> Self {
        Self {
            base_url: Arc::from(base_url.trim_end_matches('/')),
            transport,
        }
    }

    /// Absolute URL for `path`
    ///
    /// Catalog references are already absolute and pass through untouched;
    /// anything else is joined to the base endpoint.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    /// GET `path` and decode the body as `T`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> CatalogResult<T> {
        let url = self.resolve_url(path);
        tracing::debug!(url = %url, "GET");
        let value = self.transport.get_json(&url).await?;
        serde_json::from_value(value).map_err(|e| CatalogError::malformed(&url, e))
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
