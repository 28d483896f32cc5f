use qlstatus_config::Config;
use qlstatus_events::EventBus;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct ConfigWatcher {
    pub(super) config: Arc<RwLock<Config>>,
    pub(super) config_path: String,
    pub(super) events: Arc<EventBus>,
}

/// What a reload changed
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReloadSummary {
    pub servers_changed: bool,
    /// Status endpoint or timeout changed; the running fetcher keeps the old values
    pub needs_restart: bool,
}
