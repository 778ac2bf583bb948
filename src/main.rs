use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use configuration::Settings;
use market_data::{FinnhubClient, MarketDataClient};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Augur forecasting service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file, if one exists.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let settings = configuration::load_config()?;

    match cli.command {
        Commands::Serve(args) => handle_serve(args, settings).await,
        Commands::Quote(args) => handle_quote(args, settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A stock price forecasting service with a pluggable model library.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve(ServeArgs),
    /// Fetch and print the current quote for a symbol.
    Quote(QuoteArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Bind address override (e.g. "127.0.0.1").
    #[arg(long)]
    host: Option<String>,

    /// Port override.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct QuoteArgs {
    /// The symbol to quote (e.g. "AAPL").
    #[arg(long)]
    symbol: String,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Resolves the bind address and hands the settings to the web server.
async fn handle_serve(args: ServeArgs, mut settings: Settings) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    web_server::run_server(addr, settings).await
}

/// Fetches a single quote and prints it as pretty JSON.
async fn handle_quote(args: QuoteArgs, settings: Settings) -> anyhow::Result<()> {
    let client = FinnhubClient::new(&settings.market_data)?;
    let quote = client.get_quote(&args.symbol).await?;
    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}
