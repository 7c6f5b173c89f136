// Wallet provider backed by an Ethereum JSON-RPC endpoint
use alloy_primitives::{Address, TxHash};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::capability::{Signer, TransactionRequest, TxReceipt, WalletProvider};
use super::session::WalletEvent;
use super::ProviderError;

/// EIP-1193 "user rejected request"
const USER_REJECTED_CODE: i64 = 4001;

struct RpcTransport {
    url: String,
    client: Client,
    request_id: AtomicU64,
}

impl RpcTransport {
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, ProviderError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        debug!("JSON-RPC request: method={}, id={}", method, id);

        let request = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("RPC request failed: {}", e)))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        parse_response(body)
    }
}

/// Unwrap a JSON-RPC 2.0 response envelope
fn parse_response<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, ProviderError> {
    if let Some(error) = body.get("error") {
        let code = error["code"].as_i64().unwrap_or_default();
        let message = error["message"].as_str().unwrap_or("Unknown error").to_string();
        if code == USER_REJECTED_CODE {
            return Err(ProviderError::Rejected(message));
        }
        return Err(ProviderError::Rpc { code, message });
    }

    let result = body
        .get("result")
        .cloned()
        .ok_or_else(|| ProviderError::InvalidResponse("missing result".to_string()))?;

    serde_json::from_value(result).map_err(|e| ProviderError::InvalidResponse(e.to_string()))
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: TxHash,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    block_number: Option<String>,
}

impl From<RpcReceipt> for TxReceipt {
    fn from(r: RpcReceipt) -> Self {
        TxReceipt {
            transaction_hash: r.transaction_hash,
            // Pre-Byzantium receipts carry no status
            success: r.status.as_deref() != Some("0x0"),
            block_number: r.block_number.as_deref().and_then(parse_quantity),
        }
    }
}

fn parse_quantity(hex: &str) -> Option<u64> {
    u64::from_str_radix(hex.trim_start_matches("0x"), 16).ok()
}

/// Shortest interval used for account and receipt polling
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Wallet whose accounts and signing live behind a JSON-RPC node
/// (a dev node with unlocked accounts, or a wallet's RPC bridge).
pub struct JsonRpcWallet {
    transport: Arc<RpcTransport>,
    poll_interval: Duration,
}

impl JsonRpcWallet {
    pub fn new(url: String, poll_interval: Duration) -> Self {
        if poll_interval < MIN_POLL_INTERVAL {
            warn!(
                "Poll interval {:?} too short, using {:?}",
                poll_interval, MIN_POLL_INTERVAL
            );
        }
        Self {
            transport: Arc::new(RpcTransport {
                url,
                client: Client::new(),
                request_id: AtomicU64::new(1),
            }),
            poll_interval: poll_interval.max(MIN_POLL_INTERVAL),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub async fn accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.transport.call("eth_accounts", json!([])).await
    }

    /// Poll `eth_accounts` and report every change as an event.
    ///
    /// Stops when the event receiver is dropped.
    pub fn watch_accounts(&self, events: mpsc::Sender<WalletEvent>) -> JoinHandle<()> {
        let transport = self.transport.clone();
        let poll_interval = self.poll_interval;

        tokio::spawn(async move {
            let mut watch = AccountWatch::default();
            let mut ticker = tokio::time::interval(poll_interval);

            loop {
                ticker.tick().await;
                if events.is_closed() {
                    break;
                }

                let accounts: Vec<Address> = match transport.call("eth_accounts", json!([])).await {
                    Ok(accounts) => accounts,
                    Err(e) => {
                        warn!("Account poll failed: {}", e);
                        continue;
                    }
                };

                if let Some(changed) = watch.observe(accounts) {
                    if events.send(WalletEvent::AccountsChanged(changed)).await.is_err() {
                        break;
                    }
                }
            }
            debug!("Account watcher stopped");
        })
    }
}

#[async_trait]
impl WalletProvider for JsonRpcWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.transport.call("eth_requestAccounts", json!([])).await
    }

    async fn signer(&self) -> Result<Arc<dyn Signer>, ProviderError> {
        let address = self
            .accounts()
            .await?
            .into_iter()
            .next()
            .ok_or(ProviderError::NoAccounts)?;

        Ok(Arc::new(JsonRpcSigner {
            address,
            transport: self.transport.clone(),
            poll_interval: self.poll_interval,
        }))
    }
}

pub struct JsonRpcSigner {
    address: Address,
    transport: Arc<RpcTransport>,
    poll_interval: Duration,
}

#[async_trait]
impl Signer for JsonRpcSigner {
    async fn address(&self) -> Result<Address, ProviderError> {
        Ok(self.address)
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, ProviderError> {
        self.transport.call("eth_sendTransaction", json!([tx])).await
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TxReceipt, ProviderError> {
        loop {
            let receipt: Option<RpcReceipt> = self
                .transport
                .call("eth_getTransactionReceipt", json!([hash]))
                .await?;

            if let Some(receipt) = receipt {
                return Ok(receipt.into());
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// Tracks the last account list seen by the watcher
#[derive(Default, Debug)]
struct AccountWatch {
    last: Option<Vec<Address>>,
}

impl AccountWatch {
    /// Returns the new list when it differs from the previous observation.
    /// The first observation only sets the baseline.
    fn observe(&mut self, accounts: Vec<Address>) -> Option<Vec<Address>> {
        match self.last.replace(accounts.clone()) {
            Some(previous) if previous != accounts => Some(accounts),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, B256};

    const ALICE: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");

    #[test]
    fn test_parse_result() {
        let accounts: Vec<Address> = parse_response(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": ["0x5fbdb2315678afecb367f032d93f642f64180aa3"]
        }))
        .unwrap();
        assert_eq!(accounts, vec![ALICE]);
    }

    #[test]
    fn test_user_rejection_code() {
        let err = parse_response::<Vec<Address>>(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": 4001, "message": "User rejected the request." }
        }))
        .unwrap_err();
        assert_eq!(err, ProviderError::Rejected("User rejected the request.".to_string()));

        let err = parse_response::<Vec<Address>>(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32601, "message": "Method not found" }
        }))
        .unwrap_err();
        assert!(matches!(err, ProviderError::Rpc { code: -32601, .. }));
    }

    #[test]
    fn test_missing_result() {
        let err = parse_response::<Vec<Address>>(json!({ "jsonrpc": "2.0", "id": 1 })).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[test]
    fn test_receipt_status() {
        let hash = B256::repeat_byte(0x11);
        let pending: Option<RpcReceipt> = parse_response(json!({ "result": null })).unwrap();
        assert!(pending.is_none());

        let mined: Option<RpcReceipt> = parse_response(json!({
            "result": {
                "transactionHash": hash,
                "status": "0x1",
                "blockNumber": "0x1b4"
            }
        }))
        .unwrap();
        let receipt: TxReceipt = mined.unwrap().into();
        assert!(receipt.success);
        assert_eq!(receipt.block_number, Some(436));
        assert_eq!(receipt.transaction_hash, hash);

        let reverted: RpcReceipt = serde_json::from_value(json!({
            "transactionHash": hash,
            "status": "0x0"
        }))
        .unwrap();
        assert!(!TxReceipt::from(reverted).success);
    }

    #[test]
    fn test_transaction_request_shape() {
        let tx = TransactionRequest {
            from: ALICE,
            to: Address::ZERO,
            data: vec![0xde, 0xad].into(),
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["data"], "0xdead");
        assert!(value["from"]
            .as_str()
            .unwrap()
            .eq_ignore_ascii_case("0x5fbdb2315678afecb367f032d93f642f64180aa3"));
    }

    #[test]
    fn test_watch_emits_only_on_change() {
        let mut watch = AccountWatch::default();

        assert_eq!(watch.observe(vec![ALICE]), None);
        assert_eq!(watch.observe(vec![ALICE]), None);
        assert_eq!(watch.observe(vec![]), Some(vec![]));
        assert_eq!(watch.observe(vec![]), None);
        assert_eq!(watch.observe(vec![ALICE]), Some(vec![ALICE]));
    }

    #[tokio::test]
    async fn test_zero_poll_interval_is_floored() {
        let wallet = JsonRpcWallet::new("http://127.0.0.1:1".to_string(), Duration::ZERO);
        assert_eq!(wallet.poll_interval(), MIN_POLL_INTERVAL);

        // Receiver already gone: the watcher ticks once and exits cleanly
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        wallet.watch_accounts(tx).await.unwrap();
    }
}
