use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::Subscription;

/// Feed `subscriptions` into the work queue in order, then close it by
/// dropping the sender. Returns how many were enqueued.
pub async fn produce(subscriptions: Vec<Subscription>, work_tx: mpsc::Sender<Subscription>) -> usize {
    let total = subscriptions.len();
    let mut sent = 0;

    for subscription in subscriptions {
        if work_tx.send(subscription).await.is_err() {
            warn!("Work queue closed after {} of {} subscriptions", sent, total);
            return sent;
        }
        sent += 1;
    }

    debug!("Enqueued {} subscriptions, closing work queue", sent);
    sent
}
