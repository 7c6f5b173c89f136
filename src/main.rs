use badge_portal::cli::{self, Cli, Commands, DEFAULT_CONFIG_PATH};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve {
            config,
            port,
            static_dir,
        }) => {
            cli::serve::handle_serve_command(&config, port, static_dir).await?;
        }
        Some(Commands::Wallet {
            config,
            rpc_url,
            no_provider,
        }) => {
            cli::wallet::handle_wallet_command(&config, rpc_url, no_provider).await;
        }
        // No subcommand: run the server with defaults
        None => {
            cli::serve::handle_serve_command(DEFAULT_CONFIG_PATH, None, None).await?;
        }
    }

    Ok(())
}
