//! devicelist - List the devices registered under an account on a remote device service

use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<ExitCode> {
    // Logs go to stderr so device lines on stdout stay clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devicelist=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Starting devicelist v{}", env!("CARGO_PKG_VERSION"));

    devicelist::cli::run()
}
