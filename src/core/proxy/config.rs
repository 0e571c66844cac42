//! Probe Targets and Options

/// Connectivity check answered with an empty 204 by Google's edge
pub const GENERATE_204_URL: &str = "https://www.google.com/generate_204";

/// Small raw file served by GitHub's raw-content host
pub const RAW_GITHUB_URL: &str =
    "https://raw.githubusercontent.com/github/gitignore/main/Go.gitignore";

/// Per-request timeout for every probe
pub const DEFAULT_PROBE_TIMEOUT_MS: u32 = 3000;

/// External URL and the status code that counts as success
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub url: String,
    pub expected_status: u16,
}

impl ProbeTarget {
    pub fn new(url: impl Into<String>, expected_status: u16) -> Self {
        Self {
            url: url.into(),
            expected_status,
        }
    }
}

/// Fixed target set: two providers so one outage cannot decide the verdict
pub fn default_targets() -> Vec<ProbeTarget> {
    vec![
        ProbeTarget::new(GENERATE_204_URL, 204),
        ProbeTarget::new(RAW_GITHUB_URL, 200),
    ]
}

/// Probe configuration
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// Every target must answer with its expected status
    pub targets: Vec<ProbeTarget>,

    /// Timeout in milliseconds for each probe request
    /// Default: 3000ms
    pub timeout_ms: u32,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            targets: default_targets(),
            timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
        }
    }
}

impl ProbeOptions {
    /// Default targets with a custom timeout
    pub fn with_timeout_ms(timeout_ms: u32) -> Self {
        Self {
            timeout_ms,
            ..Self::default()
        }
    }
}
