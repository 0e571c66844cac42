//! Proxy Health Prober
//!
//! Answers "is this single proxy usable right now?" by sending one GET per
//! probe target through the proxy, all targets at once, and requiring every
//! one of them to come back with its expected status code.
//!
//! All probes are awaited before the verdict is formed, even when an early
//! probe has already failed, so no request is left running after return.

use crate::core::debug_logger::get_debug_logger;
use crate::core::proxy::{
    address::ProxyAddress,
    client::ProbeClient,
    config::{ProbeOptions, ProbeTarget},
};
use futures::future::join_all;
use std::time::{Duration, Instant};

/// Result of one GET against one probe target
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub target: ProbeTarget,
    /// Status code, when a response arrived
    pub status_code: Option<u16>,
    /// Transport error text, when no response arrived
    pub error: Option<String>,
}

impl ProbeOutcome {
    /// Completed without transport error and with the expected status
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.status_code == Some(self.target.expected_status)
    }
}

/// Per-address probe result with per-target detail
#[derive(Debug, Clone)]
pub struct ProbeReport {
    /// Address as given by the caller
    pub address: String,
    /// Parse failure; no request was issued when set
    pub rejected: Option<String>,
    pub outcomes: Vec<ProbeOutcome>,
    pub elapsed: Duration,
}

impl ProbeReport {
    fn rejected(address: &str, reason: String) -> Self {
        Self {
            address: address.to_string(),
            rejected: Some(reason),
            outcomes: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Availability verdict: logical AND over every outcome
    pub fn is_available(&self) -> bool {
        self.rejected.is_none() && self.outcomes.iter().all(ProbeOutcome::is_success)
    }

    /// Targets that did not pass, for diagnostics
    pub fn failed_targets(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(|o| o.target.url.as_str())
            .collect()
    }
}

/// Probe one proxy address against every configured target
///
/// Malformed addresses are rejected without any network call. Transport
/// errors and unexpected status codes are both recorded as failed outcomes;
/// nothing is propagated as an error.
pub async fn probe_proxy(
    address: &str,
    options: &ProbeOptions,
    client: &dyn ProbeClient,
) -> ProbeReport {
    let debug_logger = get_debug_logger();

    let proxy = match ProxyAddress::parse(address) {
        Ok(proxy) => proxy,
        Err(err) => {
            debug_logger.debug_sync(
                "ProxyProber",
                "invalid_address",
                &format!("Rejected proxy address {:?}: {}", address, err),
            );
            return ProbeReport::rejected(address, err.to_string());
        }
    };

    let start = Instant::now();
    let probe_id = format!("probe_{}", uuid::Uuid::new_v4());
    debug_logger.proxy_probe_start(
        &proxy.redacted(),
        options.targets.len(),
        options.timeout_ms as u64,
        probe_id.clone(),
    );

    let probes = options
        .targets
        .iter()
        .map(|target| probe_target(&proxy, target, options.timeout_ms, client));
    let outcomes = join_all(probes).await;

    let report = ProbeReport {
        address: proxy.as_str().to_string(),
        rejected: None,
        outcomes,
        elapsed: start.elapsed(),
    };

    debug_logger.proxy_probe_end(
        &proxy.redacted(),
        report.is_available(),
        &report.failed_targets(),
        report.elapsed.as_millis() as u64,
        probe_id,
    );

    report
}

/// Availability verdict for one proxy address
pub async fn is_proxy_available(
    address: &str,
    options: &ProbeOptions,
    client: &dyn ProbeClient,
) -> bool {
    probe_proxy(address, options, client).await.is_available()
}

async fn probe_target(
    proxy: &ProxyAddress,
    target: &ProbeTarget,
    timeout_ms: u32,
    client: &dyn ProbeClient,
) -> ProbeOutcome {
    match client.get_through(proxy, target.url.clone(), timeout_ms).await {
        Ok(status) => ProbeOutcome {
            target: target.clone(),
            status_code: Some(status),
            error: None,
        },
        Err(err) => ProbeOutcome {
            target: target.clone(),
            status_code: None,
            error: Some(err),
        },
    }
}
