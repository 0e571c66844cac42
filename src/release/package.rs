//! Asset repackaging and content hashing
//!
//! - Single files are stored zstd compressed
//! - Zip distributions are re-rooted into a zstd compressed tar
//!
//! The tar is built in memory straight from the zip entries, with every
//! mtime pinned to one caller-supplied timestamp, so repackaging the same
//! release twice produces identical bytes.

use crate::error::SyncError;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::io::{Cursor, Read};
use std::path::{Component, Path, PathBuf};

/// zstd level 0 selects the library default (3)
const ZSTD_LEVEL: i32 = 0;

const DEFAULT_FILE_MODE: u32 = 0o644;
const DEFAULT_DIR_MODE: u32 = 0o755;

pub type Digest256 = [u8; 32];

pub fn compress_zstd(data: &[u8]) -> Result<Vec<u8>, SyncError> {
    zstd::encode_all(data, ZSTD_LEVEL).map_err(|e| SyncError::Archive(e.to_string()))
}

/// Re-pack the `source_root/` subtree of a zip as `target_root/` in a tar.zst
///
/// # Errors
/// * `SyncError::Archive` - unreadable zip, an entry path escaping the
///   archive, or no entries under `source_root`
pub fn repack_zip_as_tar_zstd(
    zip_bytes: &[u8],
    source_root: &str,
    target_root: &str,
    mtime: u64,
) -> Result<Vec<u8>, SyncError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(zip_bytes))?;
    let source_root = Path::new(source_root.trim_matches('/'));
    let target_root = Path::new(target_root.trim_matches('/'));

    let mut dirs = BTreeSet::new();
    let mut files = Vec::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let raw_name = entry.name().to_string();

        let enclosed: PathBuf = entry
            .enclosed_name()
            .map(|p| p.to_path_buf())
            .ok_or_else(|| SyncError::Archive(format!("Illegal file path: {}", raw_name)))?;

        let relative = match enclosed.strip_prefix(source_root) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => continue,
        };

        if entry.is_dir() {
            if !relative.as_os_str().is_empty() {
                dirs.insert(relative);
            }
            continue;
        }

        // Zips often omit explicit directory entries
        let mut parent = relative.parent();
        while let Some(dir) = parent {
            if dir.as_os_str().is_empty() {
                break;
            }
            dirs.insert(dir.to_path_buf());
            parent = dir.parent();
        }

        let mode = entry
            .unix_mode()
            .map(|m| m & 0o777)
            .filter(|m| *m != 0)
            .unwrap_or(DEFAULT_FILE_MODE);
        let mut data = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut data)?;
        files.push((relative, mode, data));
    }

    if files.is_empty() {
        return Err(SyncError::Archive(format!(
            "No files under {}/ in archive",
            source_root.display()
        )));
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut builder = tar::Builder::new(Vec::new());

    if !target_root.as_os_str().is_empty() {
        append_dir(&mut builder, target_root, mtime)?;
    }
    for dir in &dirs {
        append_dir(&mut builder, &target_root.join(dir), mtime)?;
    }
    for (relative, mode, data) in &files {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_size(data.len() as u64);
        header.set_mode(*mode);
        header.set_mtime(mtime);
        builder.append_data(&mut header, tar_path(&target_root.join(relative)), data.as_slice())?;
    }

    let tar_bytes = builder.into_inner()?;
    compress_zstd(&tar_bytes)
}

fn append_dir(builder: &mut tar::Builder<Vec<u8>>, path: &Path, mtime: u64) -> Result<(), SyncError> {
    let mut header = tar::Header::new_gnu();
    header.set_entry_type(tar::EntryType::Directory);
    header.set_size(0);
    header.set_mode(DEFAULT_DIR_MODE);
    header.set_mtime(mtime);
    builder.append_data(&mut header, tar_path(path), std::io::empty())?;
    Ok(())
}

/// Forward-slash path regardless of host platform
fn tar_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

pub fn sha256(data: &[u8]) -> Digest256 {
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&Sha256::digest(data));
    digest
}

/// Hash of an existing file; `None` when the file does not exist
pub fn file_sha256(path: &Path) -> Result<Option<Digest256>, SyncError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(sha256(&bytes))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
