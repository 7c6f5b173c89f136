pub mod serve;
pub mod wallet;

use clap::{Parser, Subcommand};

pub const DEFAULT_CONFIG_PATH: &str = "badge-portal.toml";

#[derive(Parser)]
#[command(name = "badge-portal")]
#[command(about = "Healing badge portal: account API and wallet console", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the HTTP server (signup/login API + static front-end)
    Serve {
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: String,
        /// Overrides both the config file and PORT
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        static_dir: Option<String>,
    },
    /// Open the wallet console (connect, mint, page navigation)
    Wallet {
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: String,
        #[arg(long)]
        rpc_url: Option<String>,
        /// Run without any wallet provider attached
        #[arg(long, default_value = "false")]
        no_provider: bool,
    },
}
