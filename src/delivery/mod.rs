//! Serialized delivery of recent items to the messaging channel.
//!
//! A single task drains the delivery queue, so the notifier never sees
//! concurrent sends. Every item counts as handled whether or not the send
//! succeeds; a run that handled nothing ends with a heartbeat message.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::app::{Result, RsspushError};
use crate::domain::FeedItem;
use crate::notifier::Notifier;

pub const HEARTBEAT_MESSAGE: &str = "😆 heartbeat only, no new items this run";
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Pause `pause` after every `every` handled items. `every == 0` never
/// pauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub every: usize,
    pub pause: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            every: 10,
            pause: Duration::from_secs(2),
        }
    }
}

impl Pacing {
    pub fn disabled() -> Self {
        Self {
            every: 0,
            pause: Duration::ZERO,
        }
    }

    fn due(&self, handled: usize) -> bool {
        self.every > 0 && handled > 0 && handled % self.every == 0
    }
}

/// Outcome of one delivery run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Items taken off the queue, successful or not
    pub handled: usize,
    pub sent: usize,
    pub failed: usize,
    pub pauses: usize,
    /// The run handled nothing and fell back to the heartbeat
    pub heartbeat: bool,
}

#[derive(Clone)]
pub struct DeliveryStage {
    notifier: Arc<dyn Notifier>,
    dry_run: bool,
    pacing: Pacing,
    send_timeout: Duration,
}

impl DeliveryStage {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            dry_run: false,
            pacing: Pacing::default(),
            send_timeout: DEFAULT_SEND_TIMEOUT,
        }
    }

    /// Skip every notifier call while keeping counting, pacing and logging.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = timeout;
        self
    }

    /// Run on its own tokio task.
    pub fn spawn(self, rx: mpsc::Receiver<FeedItem>) -> JoinHandle<DeliveryReport> {
        tokio::spawn(async move { self.run(rx).await })
    }

    /// Drain `rx` until it is closed, then send the heartbeat if nothing was
    /// handled.
    pub async fn run(&self, mut rx: mpsc::Receiver<FeedItem>) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        while let Some(item) = rx.recv().await {
            info!(source = %item.source, "{} {}", item.title, item.link);

            if self.dry_run {
                debug!("Dry run, not sending");
            } else {
                match self.send(&item.display_message()).await {
                    Ok(()) => report.sent += 1,
                    Err(e) => {
                        report.failed += 1;
                        warn!(link = %item.link, "Failed to deliver item: {}", e);
                    }
                }
            }

            report.handled += 1;
            if self.pacing.due(report.handled) {
                debug!(handled = report.handled, "Pausing for {:?}", self.pacing.pause);
                tokio::time::sleep(self.pacing.pause).await;
                report.pauses += 1;
            }
        }

        if report.handled == 0 {
            report.heartbeat = true;
            info!("No new items this run, heartbeat due");

            if !self.dry_run {
                if let Err(e) = self.send(HEARTBEAT_MESSAGE).await {
                    warn!("Failed to send heartbeat: {}", e);
                }
            }
        }

        report
    }

    async fn send(&self, text: &str) -> Result<()> {
        tokio::time::timeout(self.send_timeout, self.notifier.send_message(text))
            .await
            .map_err(|_| {
                RsspushError::Timeout(format!("sending message after {:?}", self.send_timeout))
            })?
    }
}
