use super::errors::WatcherError;
use super::models::{ConfigWatcher, ReloadSummary};
use qlstatus_config::Config;
use qlstatus_events::{AppEvent, EventBus};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

type Result<T> = std::result::Result<T, WatcherError>;

impl ConfigWatcher {
    pub fn new(config: Arc<RwLock<Config>>, config_path: String, events: Arc<EventBus>) -> Self {
        Self {
            config,
            config_path,
            events,
        }
    }

    /// Compares the settings a running instance cares about
    pub fn summarize(old: &Config, new: &Config) -> ReloadSummary {
        ReloadSummary {
            servers_changed: old.servers.list != new.servers.list,
            needs_restart: old.status.endpoint != new.status.endpoint
                || old.status.timeout_secs != new.status.timeout_secs,
        }
    }

    pub async fn start_watching(self: Arc<Self>) -> Result<tokio::task::JoinHandle<()>> {
        let config_path = self.config_path.clone();
        let config = Arc::clone(&self.config);
        let events = Arc::clone(&self.events);

        let handle = tokio::spawn(async move {
            if let Err(e) = Self::watch_config_file(&config_path, config, &events).await {
                tracing::error!("Config watcher error: {}", e);
            }
        });

        Ok(handle)
    }

    async fn watch_config_file(
        config_path: &str,
        config: Arc<RwLock<Config>>,
        events: &EventBus,
    ) -> Result<()> {
        let channel_size = {
            let config_read = config.read().await;
            config_read.watch.reload_channel_size
        };

        let (tx, mut rx) = tokio::sync::mpsc::channel(channel_size);

        let mut watcher: RecommendedWatcher = notify::recommended_watcher(
            move |res: std::result::Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    if matches!(
                        event.kind,
                        notify::EventKind::Modify(_) | notify::EventKind::Create(_)
                    ) {
                        // A full channel already has a reload pending
                        let _ = tx.try_send(());
                    }
                }
            },
        )?;

        watcher.watch(Path::new(config_path), RecursiveMode::NonRecursive)?;

        while rx.recv().await.is_some() {
            let debounce_ms = {
                let config_read = config.read().await;
                config_read.watch.debounce_ms
            };

            tokio::time::sleep(tokio::time::Duration::from_millis(debounce_ms)).await;

            // Collapse the burst of events a single save produces
            while rx.try_recv().is_ok() {}

            if !Path::new(config_path).exists() {
                tracing::warn!("Config file deleted, ignoring event");
                continue;
            }

            match Self::reload(config_path, &config, events).await {
                Ok(summary) => {
                    tracing::debug!("Config reload summary: {:?}", summary);
                }
                Err(e) => {
                    events.emit(AppEvent::ConfigError { error: e.to_string() });
                }
            }
        }

        Ok(())
    }

    /// Re-reads the file and swaps it in. On error the running config is kept.
    pub async fn reload(
        config_path: &str,
        config: &RwLock<Config>,
        events: &EventBus,
    ) -> Result<ReloadSummary> {
        let new_config = Config::from_file_with_events(config_path, None).await?;

        let mut config_write = config.write().await;
        let summary = Self::summarize(&config_write, &new_config);
        let servers_count = new_config.servers_count();
        *config_write = new_config;
        drop(config_write);

        if summary.servers_changed {
            tracing::info!("Server list changed, {} server(s) configured", servers_count);
        }
        if summary.needs_restart {
            tracing::warn!("Status endpoint settings changed; restart to apply them");
        }

        events.emit(AppEvent::ConfigReloaded { servers_count });
        Ok(summary)
    }
}
