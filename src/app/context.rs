use std::sync::Arc;

use crate::app::error::Result;
use crate::cli::Settings;
use crate::config::SubscriptionConfig;
use crate::delivery::DeliveryStage;
use crate::domain::Subscription;
use crate::fetcher::http_fetcher::{build_client, HttpFetcher};
use crate::fetcher::parallel::ParallelFetcher;
use crate::fetcher::{FeedFetcher, Fetcher};
use crate::normalizer::Normalizer;
use crate::notifier::{Notifier, TelegramNotifier};
use crate::pipeline::Pipeline;

/// Everything a run needs, built once before any task is spawned.
pub struct AppContext {
    pub settings: Settings,
    pub subscriptions: Vec<Subscription>,
    pub notifier: Arc<dyn Notifier>,
    pub pipeline: Pipeline,
}

impl AppContext {
    /// Load the subscription document named in `settings` and wire the
    /// pipeline.
    pub fn new(settings: Settings) -> Result<Self> {
        let subscriptions = SubscriptionConfig::load(&settings.subscriptions_path)?
            .into_subscriptions();
        tracing::info!(
            "Loaded {} subscriptions from {}",
            subscriptions.len(),
            settings.subscriptions_path.display()
        );

        Self::with_subscriptions(settings, subscriptions)
    }

    pub fn with_subscriptions(settings: Settings, subscriptions: Vec<Subscription>) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> =
            Arc::new(HttpFetcher::new(build_client(settings.fetch_timeout)?));
        let feed_fetcher = Arc::new(
            FeedFetcher::new(fetcher, Normalizer::new()).with_timeout(settings.fetch_timeout),
        );
        let parallel_fetcher = ParallelFetcher::new(feed_fetcher)
            .with_workers(settings.workers)
            .with_lookback_hours(settings.lookback_hours);

        let notifier: Arc<dyn Notifier> = Arc::new(
            TelegramNotifier::new(
                build_client(settings.send_timeout)?,
                settings.bot_token.clone(),
                settings.channel_id,
            )
            .with_api_url(settings.api_url.clone()),
        );

        let delivery = DeliveryStage::new(notifier.clone())
            .with_dry_run(settings.dry_run)
            .with_send_timeout(settings.send_timeout);

        Ok(Self {
            settings,
            subscriptions,
            notifier,
            pipeline: Pipeline::new(parallel_fetcher, delivery),
        })
    }
}
