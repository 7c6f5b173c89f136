//! Wallet session bridge
//!
//! Binds the console front-end to an external signing capability:
//! - `Disconnected` / `Connected(address)` session state
//! - Account-change events from the provider
//! - Badge minting through the configured contract

pub mod capability;
pub mod contract;
pub mod rpc_provider;
pub mod session;
pub mod status;

use alloy_primitives::TxHash;
use thiserror::Error;

pub use capability::{Signer, TransactionRequest, TxReceipt, WalletProvider};
pub use contract::{BadgeContract, PendingMint};
pub use rpc_provider::JsonRpcWallet;
pub use session::{SessionState, WalletBridge, WalletCommand, WalletEvent, WalletHandle};
pub use status::{ConsoleView, WalletStatus, WalletView};

/// Failures reported by the wallet provider or node
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("request rejected by user: {0}")]
    Rejected(String),
    #[error("no accounts available")]
    NoAccounts,
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
}

/// Errors surfaced to the user by the bridge
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalletError {
    #[error("no wallet provider available")]
    Unavailable,
    #[error("wallet connection rejected: {0}")]
    Rejected(String),
    #[error("wallet not connected")]
    NotConnected,
    #[error("mint submission failed: {0}")]
    Submission(String),
    #[error("wallet bridge stopped")]
    Stopped,
}
