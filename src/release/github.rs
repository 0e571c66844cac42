use crate::config::HttpConfig;
use crate::core::proxy::ProxyAddress;
use crate::error::SyncError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GITHUB_API_BASE: &str = "https://api.github.com";

/// Release assets are read fully into memory; anything past this is refused
const MAX_DOWNLOAD_BYTES: u64 = 256 * 1024 * 1024;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GitHubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReleaseAsset {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    pub browser_download_url: String,
}

impl GitHubRelease {
    /// Get the version string without 'v' prefix
    pub fn version(&self) -> String {
        self.tag_name
            .strip_prefix('v')
            .unwrap_or(&self.tag_name)
            .to_string()
    }

    /// Find asset by exact file name
    pub fn find_asset(&self, name: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|asset| asset.name == name)
    }

    /// Publish time as unix seconds
    pub fn published_timestamp(&self) -> Option<u64> {
        let published_at = self.published_at.as_deref()?;
        chrono::DateTime::parse_from_rfc3339(published_at)
            .ok()
            .and_then(|t| u64::try_from(t.timestamp()).ok())
    }
}

/// Release metadata and asset download
///
/// Blocking; the pipeline handles one component at a time.
pub trait ReleaseApi {
    fn latest_release(&self, repo: &str) -> Result<GitHubRelease, SyncError>;
    fn download(&self, url: &str) -> Result<Vec<u8>, SyncError>;
}

/// GitHub client routed through the selected proxy, if any
pub struct GitHubClient {
    agent: ureq::Agent,
    user_agent: String,
}

impl GitHubClient {
    /// Build the client
    ///
    /// With `proxy` set, every request goes through it. Without one, ureq's
    /// environment defaults apply.
    pub fn new(proxy: Option<&ProxyAddress>, http: &HttpConfig) -> Result<Self, SyncError> {
        let mut builder = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(http.timeout_secs)));

        if let Some(proxy) = proxy {
            let proxy = ureq::Proxy::new(proxy.as_str())?;
            builder = builder.proxy(Some(proxy));
        }

        let agent: ureq::Agent = builder.build().into();

        Ok(Self {
            agent,
            user_agent: http.user_agent.clone(),
        })
    }
}

impl ReleaseApi for GitHubClient {
    fn latest_release(&self, repo: &str) -> Result<GitHubRelease, SyncError> {
        let url = format!("{}/repos/{}/releases/latest", GITHUB_API_BASE, repo);

        let mut response = self
            .agent
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/vnd.github+json")
            .call()?;

        if response.status() == 200 {
            let release: GitHubRelease = response.body_mut().read_json()?;
            Ok(release)
        } else {
            Err(SyncError::Http(format!(
                "GitHub API request for {} failed: HTTP {}",
                repo,
                response.status()
            )))
        }
    }

    fn download(&self, url: &str) -> Result<Vec<u8>, SyncError> {
        let mut response = self
            .agent
            .get(url)
            .header("User-Agent", &self.user_agent)
            .call()?;

        if response.status() != 200 {
            return Err(SyncError::Http(format!(
                "Download of {} failed: HTTP {}",
                url,
                response.status()
            )));
        }

        let bytes = response
            .body_mut()
            .with_config()
            .limit(MAX_DOWNLOAD_BYTES)
            .read_to_vec()?;
        Ok(bytes)
    }
}
