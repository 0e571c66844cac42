//! Proxy Selection Module
//!
//! One-shot proxy selection at process start:
//! - Address parsing with distinguishable, non-fatal failures
//! - Concurrent multi-target probing with an all-must-pass verdict
//! - Preferred-first selection with a first-winner race over candidates

pub mod address;
pub mod client;
pub mod config;
pub mod prober;
pub mod selector;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Failed to create probe client: {0}")]
    ClientInit(String),
}

// Re-export public API
pub use address::{AddressError, ProxyAddress};
pub use client::{IsahcProbeClient, ProbeClient};
pub use config::{default_targets, ProbeOptions, ProbeTarget};
pub use prober::{is_proxy_available, probe_proxy, ProbeOutcome, ProbeReport};
pub use selector::{select_proxy, ProxySelector};
