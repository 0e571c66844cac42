pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod release;

pub use error::SyncError;
