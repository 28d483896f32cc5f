use qlstatus_config::Config;
use qlstatus_events::EventBus;
use qlstatus_fetcher::StatusFetcher;
use qlstatus_models::ConfigurationError;
use qlstatus_report::Relay;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Who triggered a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// A player on the game server
    Player { name: String },
    /// Someone on the relayed IRC channel
    Irc { nick: String, channel: String },
}

impl Caller {
    pub fn is_irc(&self) -> bool {
        matches!(self, Caller::Irc { .. })
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Caller::Player { name } => f.write_str(name),
            Caller::Irc { nick, channel } => write!(f, "{}@{}", nick, channel),
        }
    }
}

/// The `!servers` command
pub struct ServersCommand {
    pub(super) config: Arc<RwLock<Config>>,
    pub(super) fetcher: Arc<StatusFetcher>,
    pub(super) relay: Relay,
    pub(super) events: Arc<EventBus>,
}

/// What happened to one invocation
#[derive(Debug)]
pub enum Invocation {
    /// A worker task is fetching and delivering; joining it is optional
    Dispatched(JoinHandle<()>),
    /// The server list is unusable; the caller was told why
    Rejected(ConfigurationError),
}
