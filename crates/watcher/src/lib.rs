mod config;
mod errors;
mod models;

pub use models::{ConfigWatcher, ReloadSummary};
pub use errors::WatcherError;
