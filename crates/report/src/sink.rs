use super::errors::SinkError;
use qlstatus_models::DisplayLine;
use std::fmt;
use tokio::sync::mpsc;

type Result<T> = std::result::Result<T, SinkError>;

/// Anything that can take replies, one line at a time
#[async_trait::async_trait]
pub trait Sink: Send + Sync {
    async fn reply(&self, line: DisplayLine) -> Result<()>;
}

/// Where an outbound line goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Everyone in the game chat
    Chat,
    /// An IRC channel relayed to the server
    Irc { channel: String },
    /// One player only
    Tell { player: String },
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Chat => f.write_str("chat"),
            Destination::Irc { channel } => write!(f, "irc {}", channel),
            Destination::Tell { player } => write!(f, "tell {}", player),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub destination: Destination,
    pub line: DisplayLine,
}

/// Outbound queue drained by whatever owns the real transports
pub type Relay = mpsc::Sender<Outbound>;

pub fn relay(capacity: usize) -> (Relay, mpsc::Receiver<Outbound>) {
    mpsc::channel(capacity)
}

/// Replies on a shared channel: game chat or an IRC channel
#[derive(Clone)]
pub struct BroadcastSink {
    relay: Relay,
    destination: Destination,
}

impl BroadcastSink {
    pub fn chat(relay: Relay) -> Self {
        Self {
            relay,
            destination: Destination::Chat,
        }
    }

    pub fn irc(relay: Relay, channel: impl Into<String>) -> Self {
        Self {
            relay,
            destination: Destination::Irc {
                channel: channel.into(),
            },
        }
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }
}

/// Replies privately to a single player
#[derive(Clone)]
pub struct TellSink {
    relay: Relay,
    destination: Destination,
}

impl TellSink {
    pub fn new(relay: Relay, player: impl Into<String>) -> Self {
        Self {
            relay,
            destination: Destination::Tell {
                player: player.into(),
            },
        }
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }
}

async fn push(relay: &Relay, destination: &Destination, line: DisplayLine) -> Result<()> {
    relay
        .send(Outbound {
            destination: destination.clone(),
            line,
        })
        .await
        .map_err(|_| SinkError::Closed)
}

#[async_trait::async_trait]
impl Sink for BroadcastSink {
    async fn reply(&self, line: DisplayLine) -> Result<()> {
        push(&self.relay, &self.destination, line).await
    }
}

#[async_trait::async_trait]
impl Sink for TellSink {
    async fn reply(&self, line: DisplayLine) -> Result<()> {
        push(&self.relay, &self.destination, line).await
    }
}
