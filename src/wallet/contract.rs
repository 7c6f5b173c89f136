//! Binding for the badge NFT contract

use alloy_primitives::{Address, Bytes, TxHash};
use alloy_sol_types::{sol, SolCall};
use std::sync::Arc;
use tracing::debug;

use super::capability::{Signer, TransactionRequest, TxReceipt};
use super::ProviderError;
use crate::config::ContractConfig;

sol! {
    function safeMint(address to, string uri);
}

pub struct BadgeContract {
    config: ContractConfig,
    signer: Arc<dyn Signer>,
}

impl BadgeContract {
    pub fn new(config: ContractConfig, signer: Arc<dyn Signer>) -> Self {
        Self { config, signer }
    }

    pub fn address(&self) -> Address {
        self.config.address
    }

    /// Calldata for `safeMint(to, uri)`
    pub fn encode_safe_mint(to: Address, uri: &str) -> Bytes {
        safeMintCall {
            to,
            uri: uri.to_string(),
        }
        .abi_encode()
        .into()
    }

    /// Send `safeMint` through the signer. Returns once the node has
    /// accepted the transaction, before it is mined.
    pub async fn safe_mint(&self, to: Address, uri: &str) -> Result<PendingMint, ProviderError> {
        let tx = TransactionRequest {
            from: self.signer.address().await?,
            to: self.config.address,
            data: Self::encode_safe_mint(to, uri),
        };

        let hash = self.signer.send_transaction(tx).await?;
        debug!("safeMint submitted: {}", hash);

        Ok(PendingMint {
            hash,
            signer: self.signer.clone(),
        })
    }
}

/// A submitted mint awaiting confirmation
pub struct PendingMint {
    pub hash: TxHash,
    signer: Arc<dyn Signer>,
}

impl PendingMint {
    pub async fn wait(self) -> Result<TxReceipt, ProviderError> {
        let receipt = self.signer.wait_for_receipt(self.hash).await?;
        if !receipt.success {
            return Err(ProviderError::Reverted(self.hash));
        }
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, keccak256};

    #[test]
    fn test_safe_mint_calldata() {
        let to = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
        let data = BadgeContract::encode_safe_mint(to, "ipfs://badge");

        let selector = &keccak256("safeMint(address,string)")[..4];
        assert_eq!(&data[..4], selector);
        assert_eq!(&data[..4], &safeMintCall::SELECTOR[..]);

        // address word, string offset, length, one padded data word
        assert_eq!(data.len(), 4 + 32 * 4);
        assert_eq!(&data[4 + 12..4 + 32], to.as_slice());
    }
}
