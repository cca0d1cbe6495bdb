use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::app::{Result, RsspushError};
use crate::notifier::Notifier;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Telegram Bot API client bound to one destination chat.
pub struct TelegramNotifier {
    client: Client,
    bot_token: String,
    chat_id: i64,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(client: Client, bot_token: impl Into<String>, chat_id: i64) -> Self {
        Self {
            client,
            bot_token: bot_token.into(),
            chat_id,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Point at a self-hosted Bot API server.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.bot_token, method)
    }

    /// POST to a Bot API method. Request URLs embed the token, so reqwest
    /// errors are stripped of their URL before they reach any log.
    async fn call(&self, method: &str, body: serde_json::Value) -> Result<()> {
        let resp = self
            .client
            .post(self.endpoint(method))
            .json(&body)
            .send()
            .await
            .map_err(|e| RsspushError::Http(e.without_url()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| RsspushError::Http(e.without_url()))?;

        match serde_json::from_str::<ApiResponse>(&text) {
            Ok(api) if status.is_success() && api.ok => Ok(()),
            Ok(api) => Err(RsspushError::Telegram(
                api.description.unwrap_or_else(|| status.to_string()),
            )),
            Err(_) => Err(RsspushError::Telegram(format!(
                "{}: unexpected response: {}",
                status, text
            ))),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_message(&self, text: &str) -> Result<()> {
        self.call(
            "sendMessage",
            json!({
                "chat_id": self.chat_id,
                "text": text,
            }),
        )
        .await
    }

    async fn verify(&self) -> Result<()> {
        self.call("getMe", json!({})).await
    }
}
