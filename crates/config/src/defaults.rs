/// Default values for configuration fields

use std::num::NonZeroUsize;

const CHAT_BATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

pub fn status_endpoint() -> String {
    "https://a2s.c16t.uk/info".to_string()
}

pub fn timeout_secs() -> u64 {
    10
}

pub fn chat_pacing() -> super::models::PacingConfig {
    super::models::PacingConfig {
        batch_size: CHAT_BATCH_SIZE,
        delay_ms: 500,
    }
}

pub fn irc_pacing() -> super::models::PacingConfig {
    // IRC relays drop lines when flooded, one line every 2s keeps them happy
    super::models::PacingConfig {
        batch_size: NonZeroUsize::MIN,
        delay_ms: 2000,
    }
}

pub fn pacing_settings() -> super::models::PacingSettings {
    super::models::PacingSettings {
        chat: chat_pacing(),
        irc: irc_pacing(),
    }
}

pub fn watch_enabled() -> bool {
    true
}

pub fn config_watch_debounce_ms() -> u64 {
    500
}

pub fn config_reload_channel_size() -> usize {
    16
}

pub fn watch_settings() -> super::models::WatchSettings {
    super::models::WatchSettings {
        enabled: watch_enabled(),
        debounce_ms: config_watch_debounce_ms(),
        reload_channel_size: config_reload_channel_size(),
    }
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# ===============================================================================
# qlstatus Configuration
# ===============================================================================

[status]
endpoint = "https://a2s.c16t.uk/info"  # Status-aggregation service queried by !servers
timeout_secs = 10                      # Give up on the service after this many seconds

[servers]
list = ""                              # Servers to show, e.g. "108.61.190.53:27960, il.qlrace.com:27961"
show_in_chat = false                   # false = reply only to the player who used !servers

# ===============================================================================
# OUTPUT PACING
# ===============================================================================
# Lines are sent in batches of batch_size with delay_ms between batches.

[pacing.chat]
batch_size = 10                        # In-game replies
delay_ms = 500

[pacing.irc]
batch_size = 1                         # IRC replies (relays throttle floods)
delay_ms = 2000

# ===============================================================================
# HOT RELOAD
# ===============================================================================
[watch]
enabled = true                         # Reload this file when it changes
debounce_ms = 500                      # Wait after the last change before reloading
reload_channel_size = 16               # Pending change notifications buffer
"#;
