//! Component sync pipeline
//!
//! For each component: latest release → asset download → repackage →
//! SHA-256 comparison with the file on disk → write + commit when changed.
//! Any error aborts the run.

use crate::config::{ComponentConfig, Config, PackageFormat};
use crate::core::debug_logger::get_debug_logger;
use crate::error::SyncError;
use crate::release::git::{commit_message, VersionControl};
use crate::release::github::{GitHubRelease, ReleaseApi};
use crate::release::package::{compress_zstd, file_sha256, repack_zip_as_tar_zstd, sha256};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Repackaged bytes match the file already in the asset directory
    UpToDate { tag: String },
    /// File rewritten and committed
    Updated {
        tag: String,
        path: PathBuf,
        bytes: usize,
    },
}

impl SyncOutcome {
    pub fn tag(&self) -> &str {
        match self {
            SyncOutcome::UpToDate { tag } | SyncOutcome::Updated { tag, .. } => tag,
        }
    }

    pub fn is_updated(&self) -> bool {
        matches!(self, SyncOutcome::Updated { .. })
    }
}

/// Collaborators and settings shared by every component in a run
pub struct SyncContext<'a> {
    pub api: &'a dyn ReleaseApi,
    pub vcs: &'a dyn VersionControl,
    pub dest_dir: &'a Path,
    pub push: bool,
}

/// Bring one component up to date
pub fn sync_component(
    component: &ComponentConfig,
    ctx: &SyncContext<'_>,
) -> Result<SyncOutcome, SyncError> {
    let debug_logger = get_debug_logger();

    let release = ctx.api.latest_release(&component.repo)?;
    let asset = release
        .find_asset(&component.asset)
        .ok_or_else(|| SyncError::AssetNotFound {
            repo: component.repo.clone(),
            tag: release.tag_name.clone(),
            asset: component.asset.clone(),
        })?;

    println!("{}: latest release {}", component.name, release.tag_name);
    println!("{}: downloading {}", component.name, asset.browser_download_url);
    debug_logger.release_found(&component.repo, &release.tag_name, &asset.browser_download_url);

    let raw = ctx.api.download(&asset.browser_download_url)?;
    let packaged = package(component, &release, &raw)?;

    let dest_path = ctx.dest_dir.join(&component.output);
    let current = match file_sha256(&dest_path) {
        Ok(digest) => digest,
        Err(e) => {
            // Unreadable current file: treat as changed and overwrite
            eprintln!("{}: cannot hash {}: {}", component.name, dest_path.display(), e);
            None
        }
    };

    if current == Some(sha256(&packaged)) {
        println!("{}: already up to date", component.name);
        debug_logger.sync_outcome(&component.name, "up_to_date", packaged.len());
        return Ok(SyncOutcome::UpToDate {
            tag: release.tag_name,
        });
    }

    println!("{}: changed, replacing {}", component.name, dest_path.display());
    std::fs::write(&dest_path, &packaged)?;

    let rel_path = relative_to_repo(&dest_path, ctx.vcs.repo_dir())?;
    ctx.vcs.commit_file(
        &rel_path,
        &commit_message(&component.name, &release.tag_name),
        ctx.push,
    )?;

    println!("{}: updated to {}", component.name, release.tag_name);
    if ctx.push {
        println!("{}: committed and pushed", component.name);
    } else {
        println!("{}: committed, push manually", component.name);
    }
    debug_logger.sync_outcome(&component.name, "updated", packaged.len());

    Ok(SyncOutcome::Updated {
        tag: release.tag_name,
        path: dest_path,
        bytes: packaged.len(),
    })
}

/// Sync every configured component (or only `only`), in order
pub fn run(
    config: &Config,
    only: Option<&str>,
    api: &dyn ReleaseApi,
    vcs: &dyn VersionControl,
) -> Result<Vec<(String, SyncOutcome)>, SyncError> {
    let components: Vec<&ComponentConfig> = config
        .components
        .iter()
        .filter(|c| only.map_or(true, |name| c.name == name))
        .collect();

    if components.is_empty() {
        return Err(SyncError::InvalidConfig(match only {
            Some(name) => format!("no component named {}", name),
            None => "no components configured".to_string(),
        }));
    }

    std::fs::create_dir_all(&config.dest_dir)?;

    let ctx = SyncContext {
        api,
        vcs,
        dest_dir: &config.dest_dir,
        push: config.push,
    };

    let mut outcomes = Vec::with_capacity(components.len());
    for component in components {
        let outcome = sync_component(component, &ctx)?;
        outcomes.push((component.name.clone(), outcome));
    }
    Ok(outcomes)
}

fn package(
    component: &ComponentConfig,
    release: &GitHubRelease,
    raw: &[u8],
) -> Result<Vec<u8>, SyncError> {
    match component.format {
        PackageFormat::Zstd => compress_zstd(raw),
        PackageFormat::TarZstd => repack_zip_as_tar_zstd(
            raw,
            &component.source_root,
            &component.target_root,
            release.published_timestamp().unwrap_or(0),
        ),
    }
}

/// Path of `file` relative to the repository root
fn relative_to_repo(file: &Path, repo_dir: &Path) -> Result<PathBuf, SyncError> {
    let file = file.canonicalize()?;
    let repo_dir = repo_dir.canonicalize()?;
    file.strip_prefix(&repo_dir)
        .map(Path::to_path_buf)
        .map_err(|_| {
            SyncError::InvalidConfig(format!(
                "{} is outside git directory {}",
                file.display(),
                repo_dir.display()
            ))
        })
}
