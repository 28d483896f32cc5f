use super::errors::SinkError;
use super::sink::Sink;
use qlstatus_models::DisplayLine;
use std::num::NonZeroUsize;
use std::time::Duration;

/// How fast lines may go out: `batch_size` lines, then a `delay` pause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub batch_size: NonZeroUsize,
    pub delay: Duration,
}

impl Pacing {
    pub fn new(batch_size: NonZeroUsize, delay: Duration) -> Self {
        Self { batch_size, delay }
    }
}

/// Sends `lines` to `sink` in order, pausing for `pacing.delay` after every
/// `pacing.batch_size` lines. There is no pause after the last line.
///
/// The first failed reply aborts delivery and is returned as is.
pub async fn deliver<S: Sink + ?Sized>(
    sink: &S,
    lines: Vec<DisplayLine>,
    pacing: Pacing,
) -> Result<(), SinkError> {
    let total = lines.len();

    for (index, line) in lines.into_iter().enumerate() {
        sink.reply(line).await?;

        let sent = index + 1;
        if sent % pacing.batch_size.get() == 0 && sent < total && !pacing.delay.is_zero() {
            tokio::time::sleep(pacing.delay).await;
        }
    }

    Ok(())
}
