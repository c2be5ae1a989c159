//! Ethereum RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint, optionally with a signing wallet
//! - Query chain state (chain id, receipts)
//! - Send transactions and wait for their receipts
//! - Handle timeouts and network errors gracefully

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::TxHash;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::transports::TransportResult;
use tokio::time::timeout;

use crate::ethereum::types::{EthereumConfig, EthereumError, EthereumResult};
use crate::ethereum::wallet::Wallet;

/// Ethereum RPC client.
#[derive(Clone)]
pub struct EthereumClient {
    provider: Arc<dyn Provider + Send + Sync>,
    node_url: url::Url,
    timeout_secs: u64,
    confirmation_timeout: Duration,
}

impl EthereumClient {
    /// Create a read-only client. No request is made until the first query.
    pub fn new(config: &EthereumConfig) -> EthereumResult<Self> {
        let node_url = parse_node_url(&config.node_url)?;
        let provider = ProviderBuilder::new().connect_http(node_url.clone());
        Ok(Self::from_parts(Arc::new(provider), node_url, config))
    }

    /// Create a client whose transactions are signed by `wallet`.
    pub fn with_wallet(config: &EthereumConfig, wallet: &Wallet) -> EthereumResult<Self> {
        let node_url = parse_node_url(&config.node_url)?;
        let provider = ProviderBuilder::new()
            .wallet(wallet.network_wallet())
            .connect_http(node_url.clone());
        Ok(Self::from_parts(Arc::new(provider), node_url, config))
    }

    fn from_parts(
        provider: Arc<dyn Provider + Send + Sync>,
        node_url: url::Url,
        config: &EthereumConfig,
    ) -> Self {
        Self {
            provider,
            node_url,
            timeout_secs: config.rpc_timeout_secs,
            confirmation_timeout: Duration::from_secs(config.confirmation_timeout_secs),
        }
    }

    async fn rpc<T, F>(&self, fut: F) -> EthereumResult<T>
    where
        F: IntoFuture<Output = TransportResult<T>>,
    {
        match timeout(Duration::from_secs(self.timeout_secs), fut).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => Err(EthereumError::Rpc(e.to_string())),
            Err(_) => Err(EthereumError::Timeout(self.timeout_secs)),
        }
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> EthereumResult<u64> {
        self.rpc(self.provider.get_chain_id()).await
    }

    /// Get a transaction receipt by hash.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> EthereumResult<Option<TransactionReceipt>> {
        self.rpc(self.provider.get_transaction_receipt(tx_hash)).await
    }

    /// Send `tx`, wait for its receipt and reject reverted transactions.
    pub async fn send_and_confirm(&self, tx: TransactionRequest) -> EthereumResult<TransactionReceipt> {
        let receipt = match timeout(self.confirmation_timeout, self.submit(tx)).await {
            Ok(result) => result?,
            Err(_) => return Err(EthereumError::Timeout(self.confirmation_timeout.as_secs())),
        };

        if !receipt.status() {
            return Err(EthereumError::Reverted(receipt.transaction_hash.to_string()));
        }
        Ok(receipt)
    }

    async fn submit(&self, tx: TransactionRequest) -> EthereumResult<TransactionReceipt> {
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| EthereumError::Rpc(e.to_string()))?;
        pending
            .get_receipt()
            .await
            .map_err(|e| EthereumError::Rpc(e.to_string()))
    }
}

impl std::fmt::Debug for EthereumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EthereumClient")
            .field("node_url", &self.node_url.as_str())
            .field("timeout_secs", &self.timeout_secs)
            .field("confirmation_timeout", &self.confirmation_timeout)
            .finish()
    }
}

fn parse_node_url(raw: &str) -> EthereumResult<url::Url> {
    raw.parse()
        .map_err(|e| EthereumError::Rpc(format!("Invalid RPC URL '{}': {}", raw, e)))
}
