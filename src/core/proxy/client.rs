//! Probe Client Implementations
//!
//! HTTP client abstraction for proxy probing: one GET through an explicitly
//! given proxy, reporting either the status code or a transport error.

use crate::core::proxy::address::ProxyAddress;
use crate::core::proxy::ProbeError;
use std::time::Duration;

use isahc::config::{Configurable, RedirectPolicy};
use isahc::{AsyncReadResponseExt, HttpClient, Request};

/// Dedicated HTTP client for probe requests
///
/// Implementations must route the request through `proxy` only, never through
/// the process environment's proxy settings.
#[async_trait::async_trait]
pub trait ProbeClient: Send + Sync {
    /// Execute GET request to `url` through `proxy`
    ///
    /// # Returns
    /// * `Ok(status)` - Response received (any status code)
    /// * `Err(String)` - Transport failure: DNS, connect, TLS, timeout
    async fn get_through(
        &self,
        proxy: &ProxyAddress,
        url: String,
        timeout_ms: u32,
    ) -> Result<u16, String>;
}

/// Production probe client implementation using isahc
pub struct IsahcProbeClient {
    client: HttpClient,
}

#[async_trait::async_trait]
impl ProbeClient for IsahcProbeClient {
    async fn get_through(
        &self,
        proxy: &ProxyAddress,
        url: String,
        timeout_ms: u32,
    ) -> Result<u16, String> {
        let proxy_uri = proxy_uri(proxy)?;

        let request = Request::get(&url)
            .proxy(Some(proxy_uri))
            .timeout(Duration::from_millis(timeout_ms as u64))
            .header(
                "User-Agent",
                format!("asset-sync/{}", env!("CARGO_PKG_VERSION")),
            )
            .body(())
            .map_err(|e| format!("Probe request creation failed: {}", e))?;

        let mut response = self
            .client
            .send_async(request)
            .await
            .map_err(|e| format!("Probe request failed: {}", e))?;

        let status = response.status().as_u16();

        // Drain the body so the connection is released before returning
        response
            .consume()
            .await
            .map_err(|e| format!("Failed to read probe response body: {}", e))?;

        Ok(status)
    }
}

/// Normalized proxy URL as the `Uri` isahc expects
fn proxy_uri(proxy: &ProxyAddress) -> Result<isahc::http::Uri, String> {
    proxy
        .url()
        .as_str()
        .parse::<isahc::http::Uri>()
        .map_err(|e| format!("Proxy URI rejected: {}", e))
}

impl IsahcProbeClient {
    pub fn new() -> Result<Self, ProbeError> {
        let client = HttpClient::builder()
            .redirect_policy(RedirectPolicy::Limit(10))
            .build()
            .map_err(|e| ProbeError::ClientInit(e.to_string()))?;
        Ok(Self { client })
    }
}
