//! # AeroDesk CLI
//!
//! Signs in against the AeroDesk backend, keeps the token in the configured
//! token file and prints API results as pretty JSON.

mod cli;

use aerodesk_client::{FileTokenStore, RestClient, Session};
use clap::Parser;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = aerodesk_common::config::load()?;
    if let Some(url) = &cli.base_url {
        config.api.base_url = url.clone();
    }

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aerodesk=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    tracing::debug!(base_url = %config.api.base_url, "AeroDesk CLI v{}", env!("CARGO_PKG_VERSION"));

    let session = Session::new(FileTokenStore::new(&config.auth.token_path));
    let rest = RestClient::from_config(&config, session)?;

    cli::execute_command(cli.command, &rest).await
}
