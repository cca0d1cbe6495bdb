//! Subscription document loading.
//!
//! The document lists the feeds to poll under `rss_info`. JSON is the
//! default format; files ending in `.toml` are read as TOML instead.
//!
//! ```json
//! {
//!   "rss_info": [
//!     { "title": "Rust Blog", "url": "https://blog.rust-lang.org/feed.xml", "full_content": false }
//!   ]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::Subscription;

/// Parsed subscription document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubscriptionConfig {
    pub rss_info: Vec<Subscription>,
}

impl SubscriptionConfig {
    /// Read and validate the document at `path`.
    ///
    /// Every URL must be absolute; a missing title falls back to the URL.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let config = if is_toml {
            Self::from_toml(&content).map_err(|e| ConfigError::Toml {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            Self::from_json(&content).map_err(|e| ConfigError::Json {
                path: path.to_path_buf(),
                source: e,
            })?
        };

        config.validated()
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        for sub in &mut self.rss_info {
            url::Url::parse(&sub.url).map_err(|e| ConfigError::InvalidUrl {
                title: sub.title.clone(),
                url: sub.url.clone(),
                source: e,
            })?;

            if sub.title.trim().is_empty() {
                sub.title = sub.url.clone();
            }
        }
        Ok(self)
    }

    pub fn into_subscriptions(self) -> Vec<Subscription> {
        self.rss_info
    }
}

/// Subscription document errors. All of them abort startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read subscription file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse subscription file at {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to parse subscription file at {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid feed URL for '{title}' ({url}): {source}")]
    InvalidUrl {
        title: String,
        url: String,
        source: url::ParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "rss.json",
            r#"{"rss_info": [
                {"title": "Rust Blog", "url": "https://blog.rust-lang.org/feed.xml", "full_content": true},
                {"title": "This Week in Rust", "url": "https://this-week-in-rust.org/rss.xml"}
            ]}"#,
        );

        let subs = SubscriptionConfig::load(&path).unwrap().into_subscriptions();

        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].title, "Rust Blog");
        assert!(subs[0].full_content);
        assert_eq!(subs[1].url, "https://this-week-in-rust.org/rss.xml");
        assert!(!subs[1].full_content);
    }

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "rss.toml",
            r#"
[[rss_info]]
title = "Rust Blog"
url = "https://blog.rust-lang.org/feed.xml"

[[rss_info]]
url = "https://this-week-in-rust.org/rss.xml"
full_content = true
"#,
        );

        let subs = SubscriptionConfig::load(&path).unwrap().into_subscriptions();

        assert_eq!(subs.len(), 2);
        assert_eq!(subs[1].title, "https://this-week-in-rust.org/rss.xml");
        assert!(subs[1].full_content);
    }

    #[test]
    fn test_empty_document_is_valid() {
        let config = SubscriptionConfig::from_json("{}").unwrap();
        assert!(config.rss_info.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SubscriptionConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "rss.json", r#"{"rss_info": [ {"title": "x" "#);

        let err = SubscriptionConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn test_invalid_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "rss.json",
            r#"{"rss_info": [{"title": "broken", "url": "not a url"}]}"#,
        );

        let err = SubscriptionConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { ref title, .. } if title == "broken"));
    }
}
