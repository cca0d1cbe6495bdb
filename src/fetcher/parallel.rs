use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::domain::{Clock, FeedItem, Subscription, TimeWindow};
use crate::fetcher::FeedFetcher;

pub const DEFAULT_WORKERS: usize = 5;
pub const DEFAULT_LOOKBACK_HOURS: i32 = 3;

/// Fixed-size pool of workers draining the subscription queue.
pub struct ParallelFetcher {
    feed_fetcher: Arc<FeedFetcher>,
    workers: usize,
    lookback_hours: i32,
    clock: Clock,
}

impl ParallelFetcher {
    pub fn new(feed_fetcher: Arc<FeedFetcher>) -> Self {
        Self {
            feed_fetcher,
            workers: DEFAULT_WORKERS,
            lookback_hours: DEFAULT_LOOKBACK_HOURS,
            clock: Utc::now,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_lookback_hours(mut self, hours: i32) -> Self {
        self.lookback_hours = hours;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Start the workers. Each one holds its own clone of `delivery_tx`, so
    /// the delivery queue stays open until every worker has exited and the
    /// caller has dropped its sender.
    pub fn spawn(
        &self,
        work_rx: mpsc::Receiver<Subscription>,
        delivery_tx: &mpsc::Sender<FeedItem>,
    ) -> WorkerPool {
        let queue = Arc::new(Mutex::new(work_rx));

        let handles = (0..self.workers)
            .map(|id| {
                let worker = Worker {
                    id,
                    queue: queue.clone(),
                    delivery_tx: delivery_tx.clone(),
                    feed_fetcher: self.feed_fetcher.clone(),
                    lookback_hours: self.lookback_hours,
                    clock: self.clock,
                };
                tokio::spawn(worker.run())
            })
            .collect();

        WorkerPool { handles }
    }
}

/// Totals across the workers that exited normally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolReport {
    /// Subscriptions fetched
    pub processed: usize,
    /// Items pushed into the delivery queue
    pub items_found: usize,
    /// Workers that panicked
    pub panicked: usize,
}

/// Running workers. Completion is observed through [`WorkerPool::join`].
pub struct WorkerPool {
    handles: Vec<JoinHandle<PoolReport>>,
}

impl WorkerPool {
    /// Wait for every worker to exit. A panicked worker is logged and its
    /// counts are lost; the others still finish.
    pub async fn join(self) -> PoolReport {
        let mut report = PoolReport::default();
        for result in join_all(self.handles).await {
            match result {
                Ok(worker) => {
                    report.processed += worker.processed;
                    report.items_found += worker.items_found;
                }
                Err(e) => {
                    report.panicked += 1;
                    error!("Worker join error: {}", e);
                }
            }
        }
        report
    }
}

struct Worker {
    id: usize,
    queue: Arc<Mutex<mpsc::Receiver<Subscription>>>,
    delivery_tx: mpsc::Sender<FeedItem>,
    feed_fetcher: Arc<FeedFetcher>,
    lookback_hours: i32,
    clock: Clock,
}

impl Worker {
    async fn run(self) -> PoolReport {
        let mut report = PoolReport::default();

        loop {
            let next = self.queue.lock().await.recv().await;
            let Some(subscription) = next else {
                break;
            };

            let window = TimeWindow::ending_at((self.clock)(), self.lookback_hours);
            debug!(
                worker = self.id,
                full_content = subscription.full_content,
                "Fetching {} ({} .. {})",
                subscription.url,
                window.start,
                window.end
            );

            let items = self.feed_fetcher.fetch(&subscription, &window).await;
            report.processed += 1;

            if !items.is_empty() {
                debug!(
                    worker = self.id,
                    "{} recent items from {}",
                    items.len(),
                    subscription.display_title()
                );
            }

            for item in items {
                if self.delivery_tx.send(item).await.is_err() {
                    warn!(worker = self.id, "Delivery queue closed, dropping remaining items");
                    return report;
                }
                report.items_found += 1;
            }
        }

        debug!(
            worker = self.id,
            processed = report.processed,
            items = report.items_found,
            "Worker finished"
        );
        report
    }
}
