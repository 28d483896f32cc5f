// Re-export all public APIs from the workspace crates

pub use qlstatus_models::*;
pub use qlstatus_events::*;
pub use qlstatus_config::*;
pub use qlstatus_fetcher::*;
pub use qlstatus_report::*;
pub use qlstatus_commands::*;
pub use qlstatus_watcher::*;

/// Prelude module for convenient imports
pub mod prelude {
    // Core models
    pub use qlstatus_models::{DisplayLine, FetchResult, ServerAddress, ServerRecord};

    // Events
    pub use qlstatus_events::{AppEvent, EventBus};

    // Configuration
    pub use qlstatus_config::Config;

    // Fetching
    pub use qlstatus_fetcher::{StatusEndpoint, StatusFetcher};

    // Formatting and delivery
    pub use qlstatus_report::{deliver, format, Pacing, Sink};

    // Commands
    pub use qlstatus_commands::{Caller, ServersCommand};

    // Watcher
    pub use qlstatus_watcher::ConfigWatcher;
}
