//! Wallet session state machine.
//!
//! The bridge owns the only copy of the session. User commands and
//! provider events reach it through channels and are applied one at a time
//! on the bridge task, so an account change that arrives mid-connect is
//! applied after that connect finishes and the session always ends up
//! reflecting the latest event. Mint confirmations are awaited on their own
//! task and reported back to the bridge as they arrive.

use alloy_primitives::{Address, TxHash};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::capability::{Signer, TxReceipt, WalletProvider};
use super::contract::{BadgeContract, PendingMint};
use super::status::{WalletStatus, WalletView};
use super::{ProviderError, WalletError};
use crate::config::ContractConfig;

pub const INSTALL_WALLET_ALERT: &str = "Please install MetaMask to use this feature.";
pub const REJECTED_ALERT: &str =
    "You rejected the connection request. Please connect your wallet to continue.";
pub const NOT_CONNECTED_ALERT: &str = "Please connect your wallet first to mint a badge.";
pub const APPROVE_ALERT: &str =
    "Please approve the transaction in your wallet to mint your badge.";
pub const MINT_FAILED_ALERT: &str =
    "An error occurred while minting the badge. Please check the console for details.";

#[derive(Clone)]
pub enum SessionState {
    Disconnected,
    Connected {
        address: Address,
        signer: Arc<dyn Signer>,
    },
}

impl SessionState {
    pub fn address(&self) -> Option<Address> {
        match self {
            SessionState::Disconnected => None,
            SessionState::Connected { address, .. } => Some(*address),
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, SessionState::Connected { .. })
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Disconnected => write!(f, "Disconnected"),
            SessionState::Connected { address, .. } => write!(f, "Connected({})", address),
        }
    }
}

/// Out-of-band notifications from the wallet provider
#[derive(Debug, Clone, PartialEq)]
pub enum WalletEvent {
    AccountsChanged(Vec<Address>),
}

/// User actions routed to the bridge task
#[derive(Debug)]
pub enum WalletCommand {
    Connect(oneshot::Sender<Result<Address, WalletError>>),
    Mint(oneshot::Sender<Result<TxHash, WalletError>>),
    Address(oneshot::Sender<Option<Address>>),
}

pub struct WalletBridge {
    provider: Option<Arc<dyn WalletProvider>>,
    view: Arc<dyn WalletView>,
    contract: ContractConfig,
    state: SessionState,
}

impl WalletBridge {
    /// `provider` is `None` when no wallet is present in the environment.
    pub fn new(
        provider: Option<Arc<dyn WalletProvider>>,
        view: Arc<dyn WalletView>,
        contract: ContractConfig,
    ) -> Self {
        Self {
            provider,
            view,
            contract,
            state: SessionState::Disconnected,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Request account access and bind a fresh signing handle.
    ///
    /// Safe to call repeatedly; each success replaces the previous session.
    pub async fn connect(&mut self) -> Result<Address, WalletError> {
        let Some(provider) = self.provider.clone() else {
            error!("No wallet provider available");
            self.view.alert(INSTALL_WALLET_ALERT);
            return Err(WalletError::Unavailable);
        };

        match Self::open_session(provider.as_ref()).await {
            Ok((address, signer)) => {
                info!("Account connected: {}", address);
                self.state = SessionState::Connected { address, signer };
                self.view.show_status(&WalletStatus::connected(address));
                Ok(address)
            }
            Err(e) => {
                error!("User rejected connection: {}", e);
                self.view.alert(REJECTED_ALERT);
                Err(WalletError::Rejected(e.to_string()))
            }
        }
    }

    async fn open_session(
        provider: &dyn WalletProvider,
    ) -> Result<(Address, Arc<dyn Signer>), ProviderError> {
        provider.request_accounts().await?;
        let signer = provider.signer().await?;
        let address = signer.address().await?;
        Ok((address, signer))
    }

    /// Apply an account list reported by the provider.
    pub async fn on_accounts_changed(&mut self, accounts: &[Address]) -> Result<(), WalletError> {
        match accounts.first() {
            Some(first) => {
                info!("Account changed to: {}", first);
                self.connect().await.map(|_| ())
            }
            None => {
                info!("Account disconnected.");
                self.disconnect();
                Ok(())
            }
        }
    }

    fn disconnect(&mut self) {
        self.state = SessionState::Disconnected;
        self.view.show_status(&WalletStatus::disconnected());
    }

    /// Mint the badge for the connected account and wait for it to be mined.
    pub async fn submit_mint(&mut self) -> Result<TxHash, WalletError> {
        let pending = self.begin_mint().await?;
        let outcome = pending.wait().await;
        self.complete_mint(outcome)
    }

    /// Send the `safeMint` transaction without waiting for its receipt.
    pub async fn begin_mint(&mut self) -> Result<PendingMint, WalletError> {
        let SessionState::Connected { signer, .. } = &self.state else {
            warn!("Mint requested without a connected wallet");
            self.view.alert(NOT_CONNECTED_ALERT);
            return Err(WalletError::NotConnected);
        };
        let signer = signer.clone();

        self.send_mint(signer).await.map_err(|e| self.mint_failed(e))
    }

    async fn send_mint(&self, signer: Arc<dyn Signer>) -> Result<PendingMint, ProviderError> {
        let contract = BadgeContract::new(self.contract.clone(), signer.clone());
        let user = signer.address().await?;

        info!("Minting badge for {} via {}", user, contract.address());
        self.view.alert(APPROVE_ALERT);

        contract.safe_mint(user, &self.contract.token_uri).await
    }

    /// Report the confirmation result of a mint sent by [`Self::begin_mint`].
    pub fn complete_mint(
        &self,
        outcome: Result<TxReceipt, ProviderError>,
    ) -> Result<TxHash, WalletError> {
        match outcome {
            Ok(receipt) => {
                let hash = receipt.transaction_hash;
                info!("Badge minted: {}", hash);
                self.view.alert(&format!(
                    "Congratulations! You've successfully minted your 'First Step' badge. Transaction hash: {}",
                    hash
                ));
                Ok(hash)
            }
            Err(e) => Err(self.mint_failed(e)),
        }
    }

    fn mint_failed(&self, e: ProviderError) -> WalletError {
        error!("Error minting badge: {}", e);
        self.view.alert(MINT_FAILED_ALERT);
        WalletError::Submission(e.to_string())
    }

    async fn handle_command(
        &mut self,
        command: WalletCommand,
        confirmed: &mpsc::Sender<MintConfirmation>,
    ) {
        // A dropped receiver means the caller stopped waiting; the action still ran
        match command {
            WalletCommand::Connect(reply) => {
                let _ = reply.send(self.connect().await);
            }
            WalletCommand::Mint(reply) => match self.begin_mint().await {
                Ok(pending) => {
                    let confirmed = confirmed.clone();
                    tokio::spawn(async move {
                        let outcome = pending.wait().await;
                        let _ = confirmed.send(MintConfirmation { outcome, reply }).await;
                    });
                }
                Err(e) => {
                    let _ = reply.send(Err(e));
                }
            },
            WalletCommand::Address(reply) => {
                let _ = reply.send(self.state.address());
            }
        }
    }

    async fn handle_event(&mut self, event: WalletEvent) {
        match event {
            WalletEvent::AccountsChanged(accounts) => {
                if let Err(e) = self.on_accounts_changed(&accounts).await {
                    warn!("Account change not applied: {}", e);
                }
            }
        }
    }

    /// Drive the bridge until every command sender is dropped.
    ///
    /// Receipts are awaited off the bridge task, so events and commands keep
    /// flowing while a mint is pending.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<WalletCommand>,
        mut events: mpsc::Receiver<WalletEvent>,
    ) {
        let (confirmed_tx, mut confirmed_rx) = mpsc::channel(8);

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command, &confirmed_tx).await,
                    None => break,
                },
                Some(event) = events.recv() => self.handle_event(event).await,
                Some(done) = confirmed_rx.recv() => {
                    let _ = done.reply.send(self.complete_mint(done.outcome));
                }
            }
        }
        info!("Wallet bridge stopped");
    }

    pub fn spawn(self, events: mpsc::Receiver<WalletEvent>) -> (WalletHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(16);
        let task = tokio::spawn(self.run(rx, events));
        (WalletHandle { commands: tx }, task)
    }
}

/// Receipt of a mint, handed back to the bridge task for reporting
struct MintConfirmation {
    outcome: Result<TxReceipt, ProviderError>,
    reply: oneshot::Sender<Result<TxHash, WalletError>>,
}

/// Cloneable front for a spawned bridge
#[derive(Clone)]
pub struct WalletHandle {
    commands: mpsc::Sender<WalletCommand>,
}

impl WalletHandle {
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> WalletCommand,
    ) -> Result<T, WalletError> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(make(tx))
            .await
            .map_err(|_| WalletError::Stopped)?;
        rx.await.map_err(|_| WalletError::Stopped)
    }

    pub async fn connect(&self) -> Result<Address, WalletError> {
        self.request(WalletCommand::Connect).await?
    }

    pub async fn mint(&self) -> Result<TxHash, WalletError> {
        self.request(WalletCommand::Mint).await?
    }

    pub async fn address(&self) -> Result<Option<Address>, WalletError> {
        self.request(WalletCommand::Address).await
    }
}
