//! VitalWatch CLI Entry Point
//!
//! This is the main entry point for the vitalwatch command-line tool.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vitalwatch_cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay(args) => {
            commands::replay(args).await?;
        }
        Commands::Listen(args) => {
            commands::listen(args).await?;
        }
        Commands::Simulate(args) => {
            commands::simulate(args).await?;
        }
        Commands::Version => {
            println!("vitalwatch {}", env!("CARGO_PKG_VERSION"));
            println!("Engine version: {}", vitalwatch::VERSION);
        }
    }

    Ok(())
}
