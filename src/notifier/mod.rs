//! Outbound messaging.
//!
//! - [`Notifier`]: async trait the delivery stage sends through
//! - [`TelegramNotifier`]: Telegram Bot API implementation

pub mod telegram;

use async_trait::async_trait;

use crate::app::Result;

pub use telegram::TelegramNotifier;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Best-effort delivery of a plain-text message.
    async fn send_message(&self, text: &str) -> Result<()>;

    /// Check credentials before the pipeline starts.
    async fn verify(&self) -> Result<()> {
        Ok(())
    }
}
