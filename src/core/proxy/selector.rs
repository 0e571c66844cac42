//! Proxy Selection
//!
//! Picks one working proxy: the preferred address when it passes on its own,
//! otherwise whichever candidate is first observed to pass while all
//! candidates are probed at once.

use crate::core::debug_logger::get_debug_logger;
use crate::core::proxy::{
    address::ProxyAddress,
    client::{IsahcProbeClient, ProbeClient},
    config::ProbeOptions,
    prober::is_proxy_available,
    ProbeError,
};
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::HashSet;
use std::time::Instant;

/// Select a usable proxy
///
/// # Behavior
/// 1. Non-empty `preferred` is probed alone; if available it is returned and
///    no candidate is ever contacted
/// 2. Otherwise every candidate is probed concurrently and the first success
///    wins. Among near-simultaneous winners the pick is arbitrary
/// 3. `None` when every candidate fails or the pool is empty; the caller
///    should then connect directly
///
/// Losing probes are dropped together with the race when this function
/// returns, which cancels their in-flight requests.
pub async fn select_proxy(
    preferred: &str,
    candidates: &[String],
    options: &ProbeOptions,
    client: &dyn ProbeClient,
) -> Option<ProxyAddress> {
    let debug_logger = get_debug_logger();
    let start = Instant::now();

    let preferred = preferred.trim();
    if !preferred.is_empty() {
        if is_proxy_available(preferred, options, client).await {
            if let Ok(address) = ProxyAddress::parse(preferred) {
                debug_logger.proxy_selection(
                    "preferred",
                    Some(&address.redacted()),
                    start.elapsed().as_millis() as u64,
                );
                return Some(address);
            }
        }
        debug_logger.debug_sync(
            "ProxySelector",
            "preferred_unavailable",
            "Preferred proxy unavailable, racing candidates",
        );
    }

    let pool = unique_candidates(candidates);
    if pool.is_empty() {
        debug_logger.proxy_selection("none", None, start.elapsed().as_millis() as u64);
        return None;
    }

    let mut race: FuturesUnordered<_> = pool
        .into_iter()
        .map(|candidate| async move {
            let available = is_proxy_available(candidate, options, client).await;
            (candidate, available)
        })
        .collect();

    while let Some((candidate, available)) = race.next().await {
        if !available {
            continue;
        }
        if let Ok(address) = ProxyAddress::parse(candidate) {
            debug_logger.proxy_selection(
                "candidate",
                Some(&address.redacted()),
                start.elapsed().as_millis() as u64,
            );
            return Some(address);
        }
    }

    debug_logger.proxy_selection("none", None, start.elapsed().as_millis() as u64);
    None
}

/// Trimmed, non-empty candidates in first-seen order
fn unique_candidates(candidates: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty() && seen.insert(*c))
        .collect()
}

/// Proxy selector bound to a probe client and options
pub struct ProxySelector {
    client: Box<dyn ProbeClient>,
    options: ProbeOptions,
}

impl ProxySelector {
    /// Create selector with the isahc probe client and default options
    ///
    /// # Errors
    ///
    /// Returns `ProbeError::ClientInit` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ProbeError> {
        Ok(Self {
            client: Box::new(IsahcProbeClient::new()?),
            options: ProbeOptions::default(),
        })
    }

    /// Configure selector with custom probe client (for testing)
    pub fn with_client(mut self, client: Box<dyn ProbeClient>) -> Self {
        self.client = client;
        self
    }

    pub fn with_options(mut self, options: ProbeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ProbeOptions {
        &self.options
    }

    pub async fn select(&self, preferred: &str, candidates: &[String]) -> Option<ProxyAddress> {
        select_proxy(preferred, candidates, &self.options, self.client.as_ref()).await
    }
}
