use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration (`~/.asset-sync/config.toml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory receiving the repackaged assets
    pub dest_dir: PathBuf,
    /// Git working tree to commit in; defaults to the parent of `dest_dir`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_dir: Option<PathBuf>,
    /// Push after committing
    pub push: bool,
    pub remote: String,
    pub branch: String,
    pub proxy: ProxyConfig,
    pub http: HttpConfig,
    pub components: Vec<ComponentConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Skip selection entirely and connect directly
    pub enabled: bool,
    /// Probed first, on its own; empty means no preference
    pub preferred: String,
    /// Raced concurrently when the preferred proxy is unavailable
    pub candidates: Vec<String>,
    /// Per-probe request timeout
    pub timeout_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Global timeout for release metadata and asset downloads
    pub timeout_secs: u64,
    pub user_agent: String,
}

/// How a downloaded asset is stored in the asset directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageFormat {
    /// Single file, zstd compressed
    Zstd,
    /// Zip archive re-packed as a zstd compressed tar
    TarZstd,
}

/// One upstream release asset to keep in sync
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Commit scope, e.g. `chore(<name>): update to v1.2.3`
    pub name: String,
    /// GitHub `owner/name`
    pub repo: String,
    /// Release asset file name
    pub asset: String,
    /// File name written into the asset directory
    pub output: String,
    pub format: PackageFormat,
    /// Directory inside the zip whose contents are kept (tar-zstd only)
    #[serde(default = "default_source_root")]
    pub source_root: String,
    /// Prefix for entries in the produced tar (tar-zstd only)
    #[serde(default = "default_target_root")]
    pub target_root: String,
}

pub(crate) fn default_source_root() -> String {
    "dist".to_string()
}

pub(crate) fn default_target_root() -> String {
    "frontend".to_string()
}
