use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rsspush::app::AppContext;
use rsspush::cli::{commands, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --debug turns on this crate's debug output
    let default_filter = if cli.debug { "info,rsspush=debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let settings = cli.settings()?;
    let ctx = AppContext::new(settings)?;

    commands::run(&ctx).await?;

    Ok(())
}
