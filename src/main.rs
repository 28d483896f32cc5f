mod bootstrap;

use qlstatus::{relay, AppEvent, ConfigWatcher, EventBus, ServersCommand, StatusFetcher};
use crate::bootstrap::{config, console, logging};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

const RELAY_CAPACITY: usize = 256;
const INPUT_CAPACITY: usize = 64;
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    logging::initialize();

    let events = EventBus::new(false);
    events.emit(AppEvent::Starting);

    let config_path = std::env::var("QLSTATUS_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = config::load(&config_path, &events).await?;

    let fetcher = Arc::new(StatusFetcher::http(
        config.status.endpoint.clone(),
        config.request_timeout(),
    )?);
    let watch_enabled = config.watch.enabled;
    let config = Arc::new(tokio::sync::RwLock::new(config));

    let (relay, outbound) = relay(RELAY_CAPACITY);
    let printer_handle = tokio::spawn(console::print_outbound(outbound));

    let config_watcher_handle = if watch_enabled {
        let config_watcher = Arc::new(ConfigWatcher::new(
            Arc::clone(&config),
            config_path,
            Arc::clone(&events),
        ));
        Some(config_watcher.start_watching().await?)
    } else {
        None
    };

    let command = ServersCommand::new(
        Arc::clone(&config),
        Arc::clone(&fetcher),
        relay.clone(),
        Arc::clone(&events),
    );

    let input = console::spawn_stdin_reader(INPUT_CAPACITY)?;

    events.emit(AppEvent::Ready {
        endpoint: fetcher.endpoint(),
    });

    // The stdin thread is not joined; returning from main ends the process
    tokio::select! {
        _ = console::run(&command, relay.clone(), input) => {
            tracing::info!("Input closed, waiting for pending reports...");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received, waiting for pending reports...");
        }
    }

    if let Some(handle) = config_watcher_handle {
        handle.abort();
        let _ = handle.await;
    }

    // The printer stops once running reports drop their relay handles
    drop(command);
    drop(relay);
    if tokio::time::timeout(DRAIN_TIMEOUT, printer_handle).await.is_err() {
        tracing::warn!("Pending reports did not finish in time");
    }

    events.emit(AppEvent::Shutdown);
    Ok(())
}
