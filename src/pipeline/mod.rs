//! Run orchestration.
//!
//! ```text
//! subscriptions → produce → work queue → ParallelFetcher workers → delivery queue → DeliveryStage
//! ```
//!
//! The delivery stage starts first, then the producer and the worker pool.
//! The delivery queue is closed only after every worker has exited, so no
//! item still in flight can be lost.

pub mod producer;

use tokio::sync::mpsc;
use tracing::info;

use crate::app::{Result, RsspushError};
use crate::delivery::{DeliveryReport, DeliveryStage};
use crate::domain::Subscription;
use crate::fetcher::parallel::ParallelFetcher;

pub use producer::produce;

pub const QUEUE_CAPACITY: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Subscriptions handed to the work queue
    pub subscriptions: usize,
    /// Subscriptions the workers fetched
    pub processed: usize,
    /// Recent items the workers handed to delivery
    pub items_found: usize,
    pub delivery: DeliveryReport,
}

pub struct Pipeline {
    parallel_fetcher: ParallelFetcher,
    delivery: DeliveryStage,
    queue_capacity: usize,
}

impl Pipeline {
    pub fn new(parallel_fetcher: ParallelFetcher, delivery: DeliveryStage) -> Self {
        Self {
            parallel_fetcher,
            delivery,
            queue_capacity: QUEUE_CAPACITY,
        }
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    /// Push every recent item of `subscriptions` through delivery once.
    pub async fn run(&self, subscriptions: Vec<Subscription>) -> Result<RunSummary> {
        info!(
            "Starting run: {} subscriptions, {} workers",
            subscriptions.len(),
            self.parallel_fetcher.workers()
        );

        let (work_tx, work_rx) = mpsc::channel(self.queue_capacity);
        let (delivery_tx, delivery_rx) = mpsc::channel(self.queue_capacity);

        let delivery = self.delivery.clone().spawn(delivery_rx);
        let producer = tokio::spawn(produce(subscriptions, work_tx));
        let pool = self.parallel_fetcher.spawn(work_rx, &delivery_tx);

        let pool_report = pool.join().await;
        info!(
            processed = pool_report.processed,
            items_found = pool_report.items_found,
            "All workers finished"
        );

        let enqueued = producer
            .await
            .map_err(|e| RsspushError::Other(format!("Producer task failed: {}", e)))?;

        info!("Closing delivery queue");
        drop(delivery_tx);

        info!("Waiting for delivery to finish");
        let report = delivery
            .await
            .map_err(|e| RsspushError::Other(format!("Delivery task failed: {}", e)))?;

        info!(
            handled = report.handled,
            sent = report.sent,
            failed = report.failed,
            heartbeat = report.heartbeat,
            "Done"
        );

        Ok(RunSummary {
            subscriptions: enqueued,
            processed: pool_report.processed,
            items_found: pool_report.items_found,
            delivery: report,
        })
    }
}
