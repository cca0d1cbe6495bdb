pub mod feed;
pub mod http_fetcher;
pub mod parallel;

use async_trait::async_trait;

use crate::app::Result;

pub use feed::FeedFetcher;

/// Raw document download. Implementations return the response body or an
/// error for transport failures and non-success statuses.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
