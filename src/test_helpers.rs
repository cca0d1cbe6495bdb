//! In-memory collaborators shared by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use crate::app::{Result, RsspushError};
use crate::fetcher::Fetcher;
use crate::notifier::Notifier;

/// 2024-01-01 12:30:00 UTC. With the default look-back of 3 hours the
/// window is `[09:00, 12:00)`.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap()
}

pub fn hours_ago(hours: i64) -> DateTime<Utc> {
    fixed_now() - TimeDelta::hours(hours)
}

/// RSS 2.0 document with one item per `(title, published)` pair.
pub fn rss_feed(entries: &[(&str, DateTime<Utc>)]) -> String {
    let items: String = entries
        .iter()
        .enumerate()
        .map(|(i, (title, published))| {
            format!(
                "<item><title>{}</title><link>https://example.com/post/{}</link><guid>post-{}</guid><pubDate>{}</pubDate></item>",
                title,
                i,
                i,
                published.to_rfc2822()
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>Mock</title>{}</channel></rss>"#,
        items
    )
}

/// Serves canned bodies by URL. Unknown URLs and registered failures
/// return an error.
#[derive(Default)]
pub struct MockFetcher {
    feeds: HashMap<String, Option<String>>,
    panics: Vec<String>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(mut self, url: &str, body: impl Into<String>) -> Self {
        self.feeds.insert(url.to_string(), Some(body.into()));
        self
    }

    pub fn with_failure(mut self, url: &str) -> Self {
        self.feeds.insert(url.to_string(), None);
        self
    }

    /// Fetching `url` panics, taking its worker down.
    pub fn with_panic(mut self, url: &str) -> Self {
        self.panics.push(url.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(url.to_string());

        if self.panics.iter().any(|p| p == url) {
            panic!("fetcher crashed on {}", url);
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.feeds.get(url) {
            Some(Some(body)) => Ok(body.as_bytes().to_vec()),
            Some(None) => Err(RsspushError::Other(format!("connection refused: {}", url))),
            None => Err(RsspushError::Other(format!("no such feed: {}", url))),
        }
    }
}

/// Records every send attempt, optionally failing or stalling each one.
#[derive(Default)]
pub struct MockNotifier {
    sent: Mutex<Vec<String>>,
    attempts: AtomicUsize,
    fail: bool,
    delay: Option<Duration>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Messages that were sent successfully.
    pub fn messages(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send_message(&self, text: &str) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail {
            return Err(RsspushError::Telegram("Too Many Requests".into()));
        }

        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
