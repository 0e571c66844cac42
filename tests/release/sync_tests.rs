use crate::common::{create_temp_dir, release, MockReleaseApi, RecordingVcs};
use asset_sync::config::Config;
use asset_sync::error::SyncError;
use asset_sync::release::{run, sync_component, SyncContext, SyncOutcome};
use std::io::{Cursor, Write};
use std::path::PathBuf;

const BACKEND_REPO: &str = "sub-store-org/Sub-Store";
const FRONTEND_REPO: &str = "sub-store-org/Sub-Store-Front-End";

fn dist_zip() -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    writer.start_file("dist/index.html", options).unwrap();
    writer.write_all(b"<html></html>").unwrap();
    writer.finish().unwrap().into_inner()
}

fn config_in(repo_dir: &std::path::Path) -> Config {
    Config {
        dest_dir: repo_dir.join("assets"),
        ..Config::default()
    }
}

#[test]
fn test_first_sync_writes_and_commits_each_component() {
    let repo = create_temp_dir();
    let config = config_in(repo.path());
    let api = MockReleaseApi::default()
        .with_release(BACKEND_REPO, release("2.19.0", &["sub-store.bundle.js"]), b"bundle()")
        .with_release(FRONTEND_REPO, release("2.15.3", &["dist.zip"]), &dist_zip());
    let vcs = RecordingVcs::new(repo.path());

    let outcomes = run(&config, None, &api, &vcs).unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|(_, o)| o.is_updated()));
    assert!(repo.path().join("assets/sub-store.bundle.js.zst").exists());
    assert!(repo.path().join("assets/sub-store.frontend.tar.zst").exists());

    let commits = vcs.commits.borrow();
    assert_eq!(commits.len(), 2);
    assert_eq!(
        commits[0].0,
        PathBuf::from("assets").join("sub-store.bundle.js.zst")
    );
    assert_eq!(commits[0].1, "chore(sub-store): update to 2.19.0");
    assert!(!commits[0].2);
    assert_eq!(commits[1].1, "chore(sub-store-frontend): update to 2.15.3");
}

#[test]
fn test_unchanged_asset_is_not_recommitted() {
    let repo = create_temp_dir();
    let config = config_in(repo.path());
    let api = MockReleaseApi::default()
        .with_release(BACKEND_REPO, release("2.19.0", &["sub-store.bundle.js"]), b"bundle()")
        .with_release(FRONTEND_REPO, release("2.15.3", &["dist.zip"]), &dist_zip());
    let vcs = RecordingVcs::new(repo.path());

    run(&config, None, &api, &vcs).unwrap();
    let second = run(&config, None, &api, &vcs).unwrap();

    assert!(second
        .iter()
        .all(|(_, o)| matches!(o, SyncOutcome::UpToDate { .. })));
    assert_eq!(second[0].1.tag(), "2.19.0");
    assert_eq!(vcs.commits.borrow().len(), 2);
}

#[test]
fn test_changed_payload_is_rewritten() {
    let repo = create_temp_dir();
    let config = config_in(repo.path());
    let vcs = RecordingVcs::new(repo.path());

    let old = MockReleaseApi::default()
        .with_release(BACKEND_REPO, release("2.19.0", &["sub-store.bundle.js"]), b"old()");
    run(&config, Some("sub-store"), &old, &vcs).unwrap();

    let new = MockReleaseApi::default()
        .with_release(BACKEND_REPO, release("2.19.1", &["sub-store.bundle.js"]), b"new()");
    let outcomes = run(&config, Some("sub-store"), &new, &vcs).unwrap();

    assert!(outcomes[0].1.is_updated());
    let written = std::fs::read(repo.path().join("assets/sub-store.bundle.js.zst")).unwrap();
    assert_eq!(zstd::decode_all(written.as_slice()).unwrap(), b"new()");
    assert_eq!(vcs.commits.borrow().len(), 2);
}

#[test]
fn test_missing_asset_aborts() {
    let repo = create_temp_dir();
    let config = config_in(repo.path());
    let api = MockReleaseApi::default()
        .with_release(BACKEND_REPO, release("2.19.0", &["other.js"]), b"x");
    let vcs = RecordingVcs::new(repo.path());
    std::fs::create_dir_all(&config.dest_dir).unwrap();

    let ctx = SyncContext {
        api: &api,
        vcs: &vcs,
        dest_dir: &config.dest_dir,
        push: false,
    };
    let result = sync_component(&config.components[0], &ctx);

    assert!(matches!(
        result,
        Err(SyncError::AssetNotFound { ref asset, .. }) if asset == "sub-store.bundle.js"
    ));
    assert!(api.downloads.borrow().is_empty());
    assert!(vcs.commits.borrow().is_empty());
}

#[test]
fn test_release_lookup_failure_aborts_run() {
    let repo = create_temp_dir();
    let config = config_in(repo.path());
    let api = MockReleaseApi::default();
    let vcs = RecordingVcs::new(repo.path());

    let result = run(&config, None, &api, &vcs);

    assert!(matches!(result, Err(SyncError::Http(_))));
}

#[test]
fn test_push_flag_reaches_vcs() {
    let repo = create_temp_dir();
    let mut config = config_in(repo.path());
    config.push = true;
    let api = MockReleaseApi::default()
        .with_release(BACKEND_REPO, release("2.19.0", &["sub-store.bundle.js"]), b"bundle()");
    let vcs = RecordingVcs::new(repo.path());

    run(&config, Some("sub-store"), &api, &vcs).unwrap();

    assert!(vcs.commits.borrow()[0].2);
}

#[test]
fn test_unknown_only_component_is_rejected() {
    let repo = create_temp_dir();
    let config = config_in(repo.path());
    let api = MockReleaseApi::default();
    let vcs = RecordingVcs::new(repo.path());

    let result = run(&config, Some("nope"), &api, &vcs);

    assert!(matches!(result, Err(SyncError::InvalidConfig(msg)) if msg.contains("nope")));
}

#[test]
fn test_dest_outside_repo_is_rejected() {
    let repo = create_temp_dir();
    let elsewhere = create_temp_dir();
    let config = config_in(elsewhere.path());
    let api = MockReleaseApi::default()
        .with_release(BACKEND_REPO, release("2.19.0", &["sub-store.bundle.js"]), b"bundle()");
    let vcs = RecordingVcs::new(repo.path());

    let result = run(&config, Some("sub-store"), &api, &vcs);

    assert!(matches!(result, Err(SyncError::InvalidConfig(_))));
    assert!(vcs.commits.borrow().is_empty());
}
