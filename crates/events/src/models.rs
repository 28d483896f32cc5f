use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    // Application lifecycle
    Starting,
    Ready { endpoint: String },
    Shutdown,

    // Configuration
    ConfigLoading { path: String },
    ConfigLoaded { servers_count: usize },
    ConfigCreated { path: String },
    ConfigMigrated { added_fields: Vec<String> },
    ConfigReloaded { servers_count: usize },
    ConfigError { error: String },

    // Commands
    CommandRejected { caller: String, reason: String },
    StatusQueued { caller: String, servers: usize },

    // Status reports
    StatusFetched { servers: usize, failed: usize, duration: Duration },
    StatusFailed { error: String },
    ReportDelivered { lines: usize, duration: Duration },

    // Errors
    Error { context: String, error: String },
}

pub struct EventBus {
    pub(super) silent_mode: bool,
}
