use tracing::info;

use crate::app::{AppContext, Result};
use crate::pipeline::RunSummary;

/// Run the pipeline once over every configured subscription.
pub async fn run(ctx: &AppContext) -> Result<RunSummary> {
    if ctx.settings.dry_run {
        info!("Dry run: items are logged, nothing is sent");
    } else {
        ctx.notifier.verify().await?;
        info!(channel = ctx.settings.channel_id, "Telegram bot verified");
    }

    let summary = ctx.pipeline.run(ctx.subscriptions.clone()).await?;

    info!(
        "Run complete: {} feeds, {} items found, {} handled ({} sent, {} failed)",
        summary.processed,
        summary.items_found,
        summary.delivery.handled,
        summary.delivery.sent,
        summary.delivery.failed
    );

    Ok(summary)
}
