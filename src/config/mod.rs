pub mod defaults;
pub mod types;

pub use types::{ComponentConfig, Config, HttpConfig, PackageFormat, ProxyConfig};

use crate::core::proxy::{ProbeOptions, ProxyAddress};
use crate::error::SyncError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

impl Config {
    /// `~/.asset-sync/config.toml`
    pub fn default_path() -> Result<PathBuf, SyncError> {
        let home = dirs::home_dir().ok_or(SyncError::HomeDirNotFound)?;
        Ok(home.join(".asset-sync").join("config.toml"))
    }

    /// Load configuration
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// read when present and built-in defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, SyncError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = Self::default_path()?;
                if !default_path.exists() {
                    return Ok(Config::default());
                }
                default_path
            }
        };

        let content = std::fs::read_to_string(&path)
            .map_err(|e| SyncError::ConfigRead(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, SyncError> {
        toml::from_str(content).map_err(|e| SyncError::ConfigParse(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, SyncError> {
        toml::to_string_pretty(self).map_err(|e| SyncError::ConfigParse(e.to_string()))
    }

    /// Write the default configuration unless a file already exists
    pub fn init() -> Result<PathBuf, SyncError> {
        let path = Self::default_path()?;
        if path.exists() {
            println!("Config already exists at {}", path.display());
            return Ok(path);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, Config::default().to_toml()?)?;
        println!("Created config at {}", path.display());
        Ok(path)
    }

    pub fn print(&self) -> Result<(), SyncError> {
        println!("{}", self.to_toml()?);
        Ok(())
    }

    /// Validate settings that would otherwise fail halfway through a run
    pub fn check(&self) -> Result<(), SyncError> {
        if self.components.is_empty() {
            return Err(SyncError::InvalidConfig("no components configured".to_string()));
        }

        let mut outputs = HashSet::new();
        for component in &self.components {
            if !is_repo_slug(&component.repo) {
                return Err(SyncError::InvalidConfig(format!(
                    "component {}: repo must be owner/name, got {:?}",
                    component.name, component.repo
                )));
            }
            if component.asset.trim().is_empty() || component.output.trim().is_empty() {
                return Err(SyncError::InvalidConfig(format!(
                    "component {}: asset and output must be set",
                    component.name
                )));
            }
            if component.output.contains('/') || component.output.contains('\\') {
                return Err(SyncError::InvalidConfig(format!(
                    "component {}: output must be a plain file name",
                    component.name
                )));
            }
            if !outputs.insert(component.output.as_str()) {
                return Err(SyncError::InvalidConfig(format!(
                    "duplicate output file {}",
                    component.output
                )));
            }
        }

        if self.proxy.enabled && self.proxy.timeout_ms == 0 {
            return Err(SyncError::InvalidConfig("proxy.timeout_ms must be > 0".to_string()));
        }

        Ok(())
    }

    /// Proxy addresses that will never pass a probe
    ///
    /// Not fatal: selection treats them as unavailable and moves on. Empty
    /// when proxy selection is disabled.
    pub fn proxy_warnings(&self) -> Vec<String> {
        if !self.proxy.enabled {
            return Vec::new();
        }

        let preferred = self.proxy.preferred.trim();
        std::iter::once(preferred)
            .filter(|p| !p.is_empty())
            .chain(
                self.proxy
                    .candidates
                    .iter()
                    .map(|c| c.trim())
                    .filter(|c| !c.is_empty()),
            )
            .filter_map(|address| {
                ProxyAddress::parse(address)
                    .err()
                    .map(|e| format!("proxy {:?} ignored: {}", address, e))
            })
            .collect()
    }

    /// Git working tree: explicit `git_dir`, else the parent of `dest_dir`
    pub fn resolved_git_dir(&self) -> PathBuf {
        if let Some(dir) = &self.git_dir {
            return dir.clone();
        }
        match self.dest_dir.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    pub fn probe_options(&self) -> ProbeOptions {
        ProbeOptions::with_timeout_ms(self.proxy.timeout_ms)
    }
}

fn is_repo_slug(repo: &str) -> bool {
    let mut parts = repo.split('/');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty()
    )
}
