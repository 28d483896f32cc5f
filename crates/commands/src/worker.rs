use super::errors::CommandError;
use qlstatus_events::{AppEvent, EventBus};
use qlstatus_fetcher::StatusFetcher;
use qlstatus_models::{FetchResult, ServerAddress};
use qlstatus_report::{deliver, format, Pacing, Sink};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

/// Fetch, format and deliver one status report.
pub async fn run_report(
    fetcher: &StatusFetcher,
    addresses: &[ServerAddress],
    sink: &dyn Sink,
    pacing: Pacing,
    events: &EventBus,
) -> Result<(), CommandError> {
    let started = Instant::now();
    let result = fetcher.fetch(addresses).await?;

    match &result {
        FetchResult::Failed { error } => {
            events.emit(AppEvent::StatusFailed { error: error.clone() });
        }
        FetchResult::Servers(records) => {
            events.emit(AppEvent::StatusFetched {
                servers: records.len(),
                failed: records.iter().filter(|r| r.is_error()).count(),
                duration: started.elapsed(),
            });
        }
    }

    let lines = format(&result);
    let count = lines.len();
    let delivering = Instant::now();
    deliver(sink, lines, pacing).await?;

    events.emit(AppEvent::ReportDelivered {
        lines: count,
        duration: delivering.elapsed(),
    });

    Ok(())
}

/// Runs [`run_report`] on its own task so the caller never waits on the
/// network or on pacing delays. Failures are logged, not returned.
pub fn spawn_report(
    fetcher: Arc<StatusFetcher>,
    addresses: Vec<ServerAddress>,
    sink: Arc<dyn Sink>,
    pacing: Pacing,
    events: Arc<EventBus>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = run_report(&fetcher, &addresses, sink.as_ref(), pacing, &events).await {
            events.emit(AppEvent::Error {
                context: "Status report".to_string(),
                error: e.to_string(),
            });
        }
    })
}
