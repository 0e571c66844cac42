use crate::common::release;
use asset_sync::config::HttpConfig;
use asset_sync::core::proxy::ProxyAddress;
use asset_sync::release::{GitHubClient, GitHubRelease};

#[test]
fn test_release_version_strips_v_prefix() {
    assert_eq!(release("v2.19.0", &[]).version(), "2.19.0");
    assert_eq!(release("2.19.0", &[]).version(), "2.19.0");
}

#[test]
fn test_find_asset_requires_exact_name() {
    let release = release("2.19.0", &["sub-store.bundle.js", "sub-store.bundle.js.map"]);

    let asset = release.find_asset("sub-store.bundle.js").unwrap();
    assert!(asset.browser_download_url.ends_with("/sub-store.bundle.js"));
    assert!(release.find_asset("sub-store").is_none());
}

#[test]
fn test_parse_github_latest_release_payload() {
    let json = r#"{
        "url": "https://api.github.com/repos/sub-store-org/Sub-Store/releases/1",
        "tag_name": "2.19.0",
        "name": "2.19.0",
        "draft": false,
        "prerelease": false,
        "published_at": "2025-06-01T08:30:00Z",
        "assets": [
            {
                "name": "sub-store.bundle.js",
                "size": 2048,
                "content_type": "application/javascript",
                "browser_download_url": "https://github.com/sub-store-org/Sub-Store/releases/download/2.19.0/sub-store.bundle.js"
            }
        ]
    }"#;

    let release: GitHubRelease = serde_json::from_str(json).unwrap();

    assert_eq!(release.tag_name, "2.19.0");
    assert_eq!(release.assets[0].size, 2048);
    assert_eq!(release.published_timestamp(), Some(1_748_766_600));
}

#[test]
fn test_unparsable_publish_time_is_none() {
    let mut release = release("2.19.0", &[]);
    release.published_at = Some("yesterday".to_string());
    assert!(release.published_timestamp().is_none());

    release.published_at = None;
    assert!(release.published_timestamp().is_none());
}

#[test]
fn test_client_builds_with_and_without_proxy() {
    let http = HttpConfig::default();
    let proxy = ProxyAddress::parse("http://127.0.0.1:7890").unwrap();

    assert!(GitHubClient::new(Some(&proxy), &http).is_ok());
    assert!(GitHubClient::new(None, &http).is_ok());
}
