use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::app::{Result, RsspushError};
use crate::domain::{FeedItem, Subscription, TimeWindow};
use crate::fetcher::http_fetcher::DEFAULT_TIMEOUT;
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;

/// Downloads one subscription and keeps the entries inside a time window.
pub struct FeedFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
    timeout: Duration,
}

impl FeedFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, normalizer: Normalizer) -> Self {
        Self {
            fetcher,
            normalizer,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Recent items of `subscription`, in feed order.
    ///
    /// Failures are logged and yield an empty list so one broken feed never
    /// affects the others.
    pub async fn fetch(&self, subscription: &Subscription, window: &TimeWindow) -> Vec<FeedItem> {
        match self.try_fetch(subscription, window).await {
            Ok(items) => items,
            Err(e) => {
                warn!(url = %subscription.url, "Failed to fetch {}: {}", subscription.display_title(), e);
                Vec::new()
            }
        }
    }

    pub async fn try_fetch(
        &self,
        subscription: &Subscription,
        window: &TimeWindow,
    ) -> Result<Vec<FeedItem>> {
        let body = tokio::time::timeout(self.timeout, self.fetcher.fetch(&subscription.url))
            .await
            .map_err(|_| {
                RsspushError::Timeout(format!(
                    "fetching {} after {:?}",
                    subscription.url, self.timeout
                ))
            })??;

        let items = self
            .normalizer
            .normalize(subscription.display_title(), &body)?;

        Ok(filter_recent(items, window))
    }
}

/// Keep items whose effective timestamp falls inside `window`.
pub fn filter_recent(items: Vec<FeedItem>, window: &TimeWindow) -> Vec<FeedItem> {
    items
        .into_iter()
        .filter(|item| {
            debug!(
                "Title={}, Url={}, Published={:?}, Updated={:?}",
                item.title, item.link, item.published_at, item.updated_at
            );
            item.effective_timestamp()
                .is_some_and(|t| window.contains(t))
        })
        .collect()
}
