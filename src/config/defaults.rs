// Built-in defaults: the Sub-Store backend bundle and front-end dist,
// probed through the usual local proxy ports.

use super::types::{
    default_source_root, default_target_root, ComponentConfig, Config, HttpConfig,
    PackageFormat, ProxyConfig,
};
use crate::core::proxy::config::DEFAULT_PROBE_TIMEOUT_MS;
use std::path::PathBuf;

pub const DEFAULT_PREFERRED_PROXY: &str = "http://127.0.0.1:10808";

pub const COMMON_PROXY_PORTS: [u16; 6] = [7890, 7891, 1080, 8080, 10808, 10809];

impl Default for Config {
    fn default() -> Self {
        Config {
            dest_dir: PathBuf::from("assets"),
            git_dir: None,
            push: false,
            remote: "origin".to_string(),
            branch: "main".to_string(),
            proxy: ProxyConfig::default(),
            http: HttpConfig::default(),
            components: vec![
                ComponentConfig {
                    name: "sub-store".to_string(),
                    repo: "sub-store-org/Sub-Store".to_string(),
                    asset: "sub-store.bundle.js".to_string(),
                    output: "sub-store.bundle.js.zst".to_string(),
                    format: PackageFormat::Zstd,
                    source_root: default_source_root(),
                    target_root: default_target_root(),
                },
                ComponentConfig {
                    name: "sub-store-frontend".to_string(),
                    repo: "sub-store-org/Sub-Store-Front-End".to_string(),
                    asset: "dist.zip".to_string(),
                    output: "sub-store.frontend.tar.zst".to_string(),
                    format: PackageFormat::TarZstd,
                    source_root: default_source_root(),
                    target_root: default_target_root(),
                },
            ],
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        ProxyConfig {
            enabled: true,
            preferred: DEFAULT_PREFERRED_PROXY.to_string(),
            candidates: COMMON_PROXY_PORTS
                .iter()
                .map(|port| format!("http://127.0.0.1:{}", port))
                .collect(),
            timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            timeout_secs: 120,
            user_agent: format!("asset-sync/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
