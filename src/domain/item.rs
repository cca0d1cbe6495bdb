use chrono::{DateTime, Utc};

/// A feed entry that survived normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    /// Display name of the subscription the entry came from
    pub source: String,
    pub title: String,
    pub link: String,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl FeedItem {
    pub fn new(source: impl Into<String>, title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            title: title.into(),
            link: link.into(),
            author: None,
            published_at: None,
            updated_at: None,
        }
    }

    /// Timestamp used for window filtering.
    ///
    /// Published wins over updated. A value at the Unix epoch counts as
    /// unset. Entries with neither timestamp yield `None` and are never
    /// considered recent.
    pub fn effective_timestamp(&self) -> Option<DateTime<Utc>> {
        [self.published_at, self.updated_at]
            .into_iter()
            .flatten()
            .find(|t| t.timestamp() != 0)
    }

    /// Text sent to the channel: author (if any), title and link on
    /// separate lines.
    pub fn display_message(&self) -> String {
        match self.author.as_deref().map(str::trim) {
            Some(author) if !author.is_empty() => {
                format!("{}\n{}\n{}", author, self.title, self.link)
            }
            _ => format!("{}\n{}", self.title, self.link),
        }
    }
}
