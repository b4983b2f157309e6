//! namespaxe - command-line client for pyincorporation namespaces

mod cli;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use namespaxe_core::{ApiClient, SessionClient, Settings};

use crate::cli::{Args, TerminalPrompt};

fn init_tracing() {
    // RUST_LOG controls the level (e.g. RUST_LOG=namespaxe_core=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    init_tracing();
    info!(command = %args.command, "namespaxe starting");

    let settings = Settings::from_env()?;
    let api = ApiClient::new(settings)?;
    let client = SessionClient::new(api, TerminalPrompt);

    let code = cli::run(&args, &client, &mut io::stdout()).await?;

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
