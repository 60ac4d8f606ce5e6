//! pproto - Pure protocol registry CLI
//!
//! Builds the protocol mapper from the shipped extensions and lets you
//! inspect it, check an extension set for conflicts, and push JSON through it.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;

use cli::{Cli, Commands};
use pure_protocol::RegistryConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("pure_protocol=info".parse()?))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = RegistryConfig::load()?;

    match cli.command {
        Commands::List { json } => commands::list::execute(json, &config),
        Commands::Decode {
            file,
            supertype,
            exclude,
        } => commands::decode::execute(&file, &supertype, exclude, &config).await,
        Commands::Check { exclude } => commands::check::execute(exclude, &config),
        Commands::Version => {
            println!("pproto {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
