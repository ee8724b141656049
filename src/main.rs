use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use trendmail::app::AppContext;
use trendmail::cli::{commands, Cli};
use trendmail::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the dry-run document.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mode = cli.mode();

    let config = Config::load(cli.config.as_deref()).context("config stage failed")?;
    let ctx = AppContext::new(config, mode).context("config stage failed")?;
    let date = ctx.report_date(Utc::now()).context("config stage failed")?;

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = commands::run(&ctx, mode, &date, &mut stdout).await {
        let stage = err.stage();
        return Err(anyhow::Error::new(err).context(format!("{stage} stage failed")));
    }

    Ok(())
}
