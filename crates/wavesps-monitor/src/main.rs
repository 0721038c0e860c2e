//! WaveSPS Monitor
//!
//! Polls the configured metrics feeds and logs every display update.
//!
//! ```text
//! wavesps-monitor [--config <path>] [--demo] [--theme-toggle]
//! ```

use anyhow::{bail, Context};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use wavesps_core::prelude::*;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    demo: bool,
    theme_toggle: bool,
}

impl Args {
    fn parse<I: IntoIterator<Item = String>>(argv: I) -> anyhow::Result<Self> {
        let mut args = Args::default();
        let mut iter = argv.into_iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = iter.next().context("--config needs a path")?;
                    args.config = Some(PathBuf::from(path));
                }
                "--demo" => args.demo = true,
                "--theme-toggle" => args.theme_toggle = true,
                "--help" | "-h" => {
                    println!("Usage: wavesps-monitor [--config <path>] [--demo] [--theme-toggle]");
                    std::process::exit(0);
                }
                other => bail!("unknown argument '{}'", other),
            }
        }

        Ok(args)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse(std::env::args().skip(1))?;

    let config = match &args.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    let ctx = AppContext::new(config)?;

    if args.theme_toggle {
        let mut store = ctx.preferences()?;
        let current = ThemePreference::load(&store).unwrap_or_default();
        let next = ThemePreference::toggle(&mut store, current)?;
        println!("{} {}", next.icon(), next);
        return Ok(());
    }

    let mode = if args.demo {
        SourceMode::Demo
    } else {
        SourceMode::Http
    };

    for (target, chart) in ctx.charts() {
        let json = chart.to_json()?;
        tracing::debug!(%target, chart = %json, "initial chart");
    }

    tracing::info!(
        base_url = %ctx.config().base_url,
        feeds = ctx.config().feeds.len(),
        ?mode,
        "starting monitor"
    );
    let handles = ctx.start_feeds(Arc::new(LogSink::new()), mode);

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    tracing::info!("shutting down");

    for handle in handles {
        let stats = handle.stats();
        tracing::info!(
            feed = handle.name(),
            cycles = stats.total(),
            succeeded = stats.succeeded,
            failed = stats.failed,
            "feed stopped"
        );
        handle.shutdown().await;
    }

    Ok(())
}
