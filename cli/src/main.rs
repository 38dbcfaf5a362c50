//! `subpath` binary.
//!
//! Reads `input.csv` and `users.json` (or the paths given with `--queries`
//! and `--users`) and writes `result1.json` (or `--output`). Log level is
//! controlled with `RUST_LOG`; logs go to stderr.

use anyhow::Context as _;
use clap::Parser;
use subpath_cli::Config;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = Config::parse();
    tracing::debug!(?config, "starting");

    let summary = subpath_cli::run(&config).context("subpath failed")?;
    tracing::info!(
        found = summary.found,
        total = summary.total,
        "done"
    );

    Ok(())
}
