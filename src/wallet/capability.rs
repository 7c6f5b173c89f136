//! Capability interfaces supplied by the wallet environment

use alloy_primitives::{Address, Bytes, TxHash};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use super::ProviderError;

/// A contract call to be signed and sent by the wallet
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
}

/// Confirmation of a mined transaction
#[derive(Debug, Clone, PartialEq)]
pub struct TxReceipt {
    pub transaction_hash: TxHash,
    pub success: bool,
    pub block_number: Option<u64>,
}

/// Entry point of an external wallet (browser extension, node, ...)
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the user for account access. The user may refuse.
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// Signing handle for the currently selected account
    async fn signer(&self) -> Result<Arc<dyn Signer>, ProviderError>;
}

/// Opaque signing handle. Keys never leave the wallet.
#[async_trait]
pub trait Signer: Send + Sync {
    async fn address(&self) -> Result<Address, ProviderError>;

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, ProviderError>;

    /// Wait until the transaction is mined. No timeout.
    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TxReceipt, ProviderError>;
}
