use super::models::{Caller, Invocation, ServersCommand};
use super::worker::spawn_report;
use qlstatus_config::{Config, PacingConfig};
use qlstatus_events::{AppEvent, EventBus};
use qlstatus_fetcher::StatusFetcher;
use qlstatus_models::{DisplayLine, LineStyle};
use qlstatus_report::{Pacing, Relay, Sink, TellSink};
use std::sync::Arc;
use tokio::sync::RwLock;

impl ServersCommand {
    pub fn new(
        config: Arc<RwLock<Config>>,
        fetcher: Arc<StatusFetcher>,
        relay: Relay,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            config,
            fetcher,
            relay,
            events,
        }
    }

    /// Handles `!servers` from `caller`, who wrote it on `origin`.
    ///
    /// The server list is read from the current configuration on every call.
    /// A bad list is reported to the caller right away; otherwise the report
    /// runs on a worker task and this returns without waiting for it.
    pub async fn invoke(&self, caller: &Caller, origin: Arc<dyn Sink>) -> Invocation {
        let (addresses, show_in_chat, chat_pacing, irc_pacing) = {
            let config = self.config.read().await;
            (
                config.server_addresses(),
                config.servers.show_in_chat,
                config.pacing.chat,
                config.pacing.irc,
            )
        };

        let addresses = match addresses {
            Ok(addresses) => addresses,
            Err(e) => {
                self.events.emit(AppEvent::CommandRejected {
                    caller: caller.to_string(),
                    reason: e.to_string(),
                });

                let reply = DisplayLine::new(e.to_string(), LineStyle::FetchError);
                if let Err(sink_err) = self.private_sink(caller, &origin).reply(reply).await {
                    tracing::warn!("Could not tell {} about the bad server list: {}", caller, sink_err);
                }
                return Invocation::Rejected(e);
            }
        };

        let (sink, pacing) = match caller {
            Caller::Irc { .. } => (origin, to_pacing(&irc_pacing)),
            Caller::Player { name } if !show_in_chat => {
                let tell: Arc<dyn Sink> = Arc::new(TellSink::new(self.relay.clone(), name.clone()));
                (tell, to_pacing(&chat_pacing))
            }
            Caller::Player { .. } => (origin, to_pacing(&chat_pacing)),
        };

        self.events.emit(AppEvent::StatusQueued {
            caller: caller.to_string(),
            servers: addresses.len(),
        });

        Invocation::Dispatched(spawn_report(
            Arc::clone(&self.fetcher),
            addresses,
            sink,
            pacing,
            Arc::clone(&self.events),
        ))
    }

    /// Players get a tell; IRC users are answered where they asked
    fn private_sink(&self, caller: &Caller, origin: &Arc<dyn Sink>) -> Arc<dyn Sink> {
        match caller {
            Caller::Player { name } => Arc::new(TellSink::new(self.relay.clone(), name.clone())),
            Caller::Irc { .. } => Arc::clone(origin),
        }
    }
}

fn to_pacing(config: &PacingConfig) -> Pacing {
    Pacing::new(config.batch_size, config.delay())
}
