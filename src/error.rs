//! Error types for the release-sync pipeline
//!
//! Proxy selection never fails with an error; everything here aborts a run.

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error("Config read error: {0}")]
    ConfigRead(String),
    #[error("Config parse error: {0}")]
    ConfigParse(String),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Release {tag} of {repo} has no asset named {asset}")]
    AssetNotFound {
        repo: String,
        tag: String,
        asset: String,
    },
    #[error("Archive error: {0}")]
    Archive(String),
    #[error("{step} failed: {output}")]
    Git { step: String, output: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ureq::Error> for SyncError {
    fn from(error: ureq::Error) -> Self {
        SyncError::Http(error.to_string())
    }
}

impl From<zip::result::ZipError> for SyncError {
    fn from(error: zip::result::ZipError) -> Self {
        SyncError::Archive(error.to_string())
    }
}
