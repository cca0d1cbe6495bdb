use serde::Deserialize;

/// One feed to poll, as listed in the subscription document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub full_content: bool,
}

impl Subscription {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            full_content: false,
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}
