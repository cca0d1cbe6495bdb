use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{Result, RsspushError};
use crate::domain::FeedItem;

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Parse an RSS/Atom/JSON Feed body into items, keeping document order.
    pub fn normalize(&self, source: &str, body: &[u8]) -> Result<Vec<FeedItem>> {
        let feed = parser::parse(body).map_err(|e| RsspushError::FeedParse(e.to_string()))?;

        let items = feed
            .entries
            .into_iter()
            .map(|entry| {
                let title = entry
                    .title
                    .map(|t| decode_html_entities(&t.content).to_string())
                    .unwrap_or_default();
                let link = entry
                    .links
                    .first()
                    .map(|l| l.href.clone())
                    .unwrap_or_default();

                let mut item = FeedItem::new(source, title, link);
                item.author = entry.authors.first().map(|a| a.name.clone());
                item.published_at = entry.published;
                item.updated_at = entry.updated;
                item
            })
            .collect();

        Ok(items)
    }
}
