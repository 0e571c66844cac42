use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "asset-sync")]
#[command(version = concat!("Ver:", env!("CARGO_PKG_VERSION")))]
#[command(about = "Sync upstream GitHub releases into a git-tracked asset directory")]
pub struct Cli {
    /// Push to the remote after committing
    #[arg(short = 'p', long = "push")]
    pub push: bool,

    /// Config file (default: ~/.asset-sync/config.toml)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Asset directory override
    #[arg(short = 'd', long = "dest")]
    pub dest: Option<PathBuf>,

    /// Preferred proxy override, e.g. http://127.0.0.1:7890
    #[arg(long = "proxy", conflicts_with = "no_proxy")]
    pub proxy: Option<String>,

    /// Skip proxy selection and connect directly
    #[arg(long = "no-proxy")]
    pub no_proxy: bool,

    /// Sync only the named component
    #[arg(long = "only")]
    pub only: Option<String>,

    /// Write the default config file
    #[arg(long = "init")]
    pub init: bool,

    /// Print the effective configuration
    #[arg(long = "print")]
    pub print: bool,

    /// Validate the configuration
    #[arg(long = "check")]
    pub check: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Command-line flags win over the config file
    pub fn apply_to(&self, config: &mut Config) {
        if self.push {
            config.push = true;
        }
        if let Some(dest) = &self.dest {
            config.dest_dir = dest.clone();
        }
        if let Some(proxy) = &self.proxy {
            config.proxy.preferred = proxy.clone();
        }
        if self.no_proxy {
            config.proxy.enabled = false;
        }
    }
}
