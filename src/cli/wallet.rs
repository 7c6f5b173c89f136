use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

use crate::config::AppConfig;
use crate::interactive::run_console;
use crate::page::PageNavigator;
use crate::wallet::{ConsoleView, JsonRpcWallet, WalletBridge, WalletProvider};

pub async fn handle_wallet_command(config_path: &str, rpc_url: Option<String>, no_provider: bool) {
    let mut config = AppConfig::load_or_default(config_path);
    if let Some(url) = rpc_url {
        config.wallet.rpc_url = url;
    }

    let (event_tx, event_rx) = mpsc::channel(16);

    let provider: Option<Arc<dyn WalletProvider>> = if no_provider {
        info!("Starting without a wallet provider");
        None
    } else {
        info!("Wallet RPC: {}", config.wallet.rpc_url);
        let wallet = JsonRpcWallet::new(
            config.wallet.rpc_url.clone(),
            Duration::from_millis(config.wallet.poll_interval_ms),
        );
        wallet.watch_accounts(event_tx.clone());
        Some(Arc::new(wallet))
    };
    drop(event_tx);

    let bridge = WalletBridge::new(provider, Arc::new(ConsoleView), config.contract);
    let (handle, task) = bridge.spawn(event_rx);

    run_console(handle, PageNavigator::default()).await;

    // Console dropped its handle; the bridge exits once commands drain
    let _ = task.await;
}
