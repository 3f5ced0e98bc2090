#![warn(clippy::all, clippy::pedantic)]

use anyhow::Result;
use clap::Parser;
use codeloom::cli::Cli;
use codeloom::config::Config;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Install default crypto provider for Rustls TLS before any reqwest
    // client is built.
    if let Err(e) = rustls::crypto::ring::default_provider().install_default() {
        eprintln!("Warning: Failed to install default crypto provider: {e:?}");
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();
    let mut config = Config::load_or_init()?;
    config.apply_env_overrides();
    codeloom::app::dispatch(cli, config).await
}
