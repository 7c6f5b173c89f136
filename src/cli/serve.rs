use std::sync::Arc;

use crate::account::{AccountRegistry, InMemoryAccountRepository};
use crate::api::ApiServer;
use crate::config::AppConfig;
use crate::error::PortalError;

pub async fn handle_serve_command(
    config_path: &str,
    port: Option<u16>,
    static_dir: Option<String>,
) -> Result<(), PortalError> {
    let mut config = AppConfig::load_or_default(config_path).with_env();
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(dir) = static_dir {
        config.server.static_dir = dir;
    }

    let registry = AccountRegistry::new(Arc::new(InMemoryAccountRepository::new()));
    ApiServer::new(registry, config.server.port, config.server.static_dir)
        .start()
        .await
}
