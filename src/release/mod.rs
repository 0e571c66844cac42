//! Release sync pipeline: GitHub release lookup, repackaging, git commit

pub mod git;
pub mod github;
pub mod package;
pub mod sync;

pub use git::{commit_message, GitCli, VersionControl};
pub use github::{GitHubClient, GitHubRelease, ReleaseApi, ReleaseAsset};
pub use sync::{run, sync_component, SyncContext, SyncOutcome};
