use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use naviq_client::cli::{run, Cli};
use naviq_client::config::ClientConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = ClientConfig::from_env()?;

    // Logs go to stderr so pages on stdout stay clean.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("naviq_client={},naviq={}", &config.rust_log, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(Cli::parse(), config).await
}
