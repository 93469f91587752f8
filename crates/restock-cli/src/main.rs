mod run;

use clap::{Parser, Subcommand};

use restock_core::load_app_config;

#[derive(Debug, Parser)]
#[command(name = "restock")]
#[command(about = "Track retail product pages and get notified on restock")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check every watchlist product once and print the results.
    Check {
        /// Print results as JSON instead of a summary table.
        #[arg(long)]
        json: bool,
        /// Also pop a desktop notification for available products.
        #[arg(long)]
        desktop: bool,
    },
    /// Poll the watchlist on an interval until interrupted.
    Watch {
        /// Also pop a desktop notification for available products.
        #[arg(long)]
        desktop: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&config.log_level)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check { json, desktop } => run::check_once(&config, json, desktop).await,
        Commands::Watch { desktop } => run::watch(&config, desktop).await,
    }
}
