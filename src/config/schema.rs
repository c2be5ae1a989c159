//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML, and every
//! field has a default pointing at a local development network.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chain::types::Blockchain;

/// Root configuration for a Creditcoin test network.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NetworkConfig {
    /// Ledger (Substrate) node settings.
    pub ledger: LedgerConfig,

    /// Ethereum node and CTC contract settings.
    pub ethereum: EthereumConfig,

    /// Logging and metrics endpoint settings.
    pub observability: ObservabilityConfig,
}

/// Ledger node configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// WebSocket RPC endpoint of the node.
    pub api_url: String,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Seconds to wait for a submitted extrinsic to be finalized.
    pub finalization_timeout_secs: u64,

    /// Seconds to wait for the offchain worker to verify a collect-coins request.
    pub verification_timeout_secs: u64,

    /// Number of finalized blocks to wait for after state-changing calls.
    pub elapsed_blocks: u32,

    /// Run the tests that need sudo to configure authorities.
    pub execute_setup_authority: bool,

    /// Treat an already registered external address as success.
    pub reuse_existing_addresses: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            api_url: "ws://127.0.0.1:9944".to_string(),
            rpc_timeout_secs: 30,
            finalization_timeout_secs: 120,
            verification_timeout_secs: 800,
            elapsed_blocks: 2,
            execute_setup_authority: false,
            reuse_existing_addresses: false,
        }
    }
}

/// Ethereum side configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EthereumConfig {
    /// JSON-RPC endpoint URL.
    pub node_url: String,

    /// Which external chain the ledger should associate addresses with.
    pub chain: Blockchain,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Seconds to wait for a transaction receipt.
    pub confirmation_timeout_secs: u64,

    /// Address of an already deployed CTC contract.
    pub ctc_contract_address: Option<String>,

    /// Compiled contract artifact (JSON with a `bytecode` field) used when
    /// no contract address is configured.
    pub ctc_contract_artifact: Option<String>,

    /// Hex private key of the contract deployer.
    pub ctc_deployer_private_key: String,

    /// Hash of a burn transaction that already happened.
    pub ctc_burn_tx_hash: Option<String>,
}

impl Default for EthereumConfig {
    fn default() -> Self {
        Self {
            node_url: "http://127.0.0.1:8545".to_string(),
            chain: Blockchain::Ethereum,
            rpc_timeout_secs: 10,
            confirmation_timeout_secs: 120,
            ctc_contract_address: None,
            ctc_contract_artifact: None,
            // Hardhat/Anvil development account #0.
            ctc_deployer_private_key:
                "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80".to_string(),
            ctc_burn_tx_hash: None,
        }
    }
}

impl fmt::Debug for EthereumConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EthereumConfig")
            .field("node_url", &self.node_url)
            .field("chain", &self.chain)
            .field("rpc_timeout_secs", &self.rpc_timeout_secs)
            .field("confirmation_timeout_secs", &self.confirmation_timeout_secs)
            .field("ctc_contract_address", &self.ctc_contract_address)
            .field("ctc_contract_artifact", &self.ctc_contract_artifact)
            .field("ctc_deployer_private_key", &"<redacted>")
            .field("ctc_burn_tx_hash", &self.ctc_burn_tx_hash)
            .finish()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Base URL of the node's Prometheus endpoint.
    pub metrics_url: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            metrics_url: "http://127.0.0.1:9615".to_string(),
        }
    }
}
