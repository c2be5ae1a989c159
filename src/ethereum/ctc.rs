//! CTC token deployment and burning.
//!
//! # Responsibilities
//! - Attach to a configured CTC contract or deploy one from a compiled artifact
//! - Burn tokens so the ledger has something to collect
//! - Wait for receipts and reject reverted transactions

use std::path::Path;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::ethereum::client::EthereumClient;
use crate::ethereum::types::{EthereumConfig, EthereumError, EthereumResult};
use crate::ethereum::wallet::Wallet;
use crate::units::MICROUNITS_PER_CTC;

/// Smallest token units ("credo") per CTC on the Ethereum side.
pub const CREDO_PER_CTC: U256 = MICROUNITS_PER_CTC;

sol! {
    /// The subset of the CTC token used here.
    interface ICreditcoinToken {
        function burn(uint256 value) external;
    }
}

/// A CTC contract and the burn transaction performed against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedCtc {
    pub address: Address,
    pub burn_tx_hash: TxHash,
}

enum Target {
    Attach(Address),
    Deploy(Bytes),
}

/// Attach to (or deploy) the CTC contract, then burn `burn_amount` credo.
///
/// Uses `config.ctc_contract_address` when set; otherwise deploys the
/// bytecode from `config.ctc_contract_artifact`.
pub async fn deploy_ctc_contract(
    config: &EthereumConfig,
    burn_amount: U256,
) -> EthereumResult<DeployedCtc> {
    let wallet = Wallet::from_private_key(&config.ctc_deployer_private_key)?;
    let target = match configured_contract(config)? {
        Some(address) => Target::Attach(address),
        None => {
            let artifact = config.ctc_contract_artifact.as_deref().ok_or_else(|| {
                EthereumError::Artifact(
                    "neither a contract address nor a contract artifact is configured".to_string(),
                )
            })?;
            Target::Deploy(load_bytecode(Path::new(artifact))?)
        }
    };

    let client = EthereumClient::with_wallet(config, &wallet)?;
    let chain_id = client.get_chain_id().await?;
    tracing::debug!(chain_id, deployer = %wallet.address(), "Connected to Ethereum node");

    let address = match target {
        Target::Attach(address) => address,
        Target::Deploy(bytecode) => {
            let tx = TransactionRequest::default()
                .with_from(wallet.address())
                .with_deploy_code(bytecode);
            let receipt = client.send_and_confirm(tx).await?;
            let address = receipt.contract_address.ok_or_else(|| {
                EthereumError::Rpc("deployment receipt has no contract address".to_string())
            })?;
            tracing::info!(contract = %address, "CTC contract deployed");
            address
        }
    };

    let call = ICreditcoinToken::burnCall { value: burn_amount };
    let tx = TransactionRequest::default()
        .with_from(wallet.address())
        .with_to(address)
        .with_input(Bytes::from(call.abi_encode()));
    let receipt = client.send_and_confirm(tx).await?;

    tracing::info!(
        contract = %address,
        burn_tx_hash = %receipt.transaction_hash,
        amount = %burn_amount,
        "CTC burned"
    );

    Ok(DeployedCtc {
        address,
        burn_tx_hash: receipt.transaction_hash,
    })
}

/// Reuse a burn that already happened.
///
/// Both `ctc_contract_address` and `ctc_burn_tx_hash` must be configured.
/// The receipt must exist, have succeeded and target the configured contract.
pub async fn existing_burn(config: &EthereumConfig) -> EthereumResult<DeployedCtc> {
    let address = configured_contract(config)?.ok_or_else(|| EthereumError::InvalidInput {
        what: "contract address",
        value: String::new(),
    })?;
    let raw_hash = config
        .ctc_burn_tx_hash
        .as_deref()
        .ok_or_else(|| EthereumError::InvalidInput {
            what: "burn transaction hash",
            value: String::new(),
        })?;
    let burn_tx_hash = raw_hash
        .parse::<TxHash>()
        .map_err(|_| EthereumError::InvalidInput {
            what: "burn transaction hash",
            value: raw_hash.to_string(),
        })?;

    let client = EthereumClient::new(config)?;
    let receipt = client
        .get_transaction_receipt(burn_tx_hash)
        .await?
        .ok_or_else(|| EthereumError::Rpc(format!("burn transaction {} not found", burn_tx_hash)))?;

    if !receipt.status() {
        return Err(EthereumError::Reverted(burn_tx_hash.to_string()));
    }
    if receipt.to != Some(address) {
        return Err(EthereumError::InvalidInput {
            what: "burn transaction target",
            value: receipt.to.map(|to| to.to_string()).unwrap_or_default(),
        });
    }

    tracing::debug!(contract = %address, %burn_tx_hash, "Reusing configured burn");
    Ok(DeployedCtc {
        address,
        burn_tx_hash,
    })
}

fn configured_contract(config: &EthereumConfig) -> EthereumResult<Option<Address>> {
    config
        .ctc_contract_address
        .as_deref()
        .map(|address| {
            address.parse::<Address>().map_err(|_| EthereumError::InvalidInput {
                what: "contract address",
                value: address.to_string(),
            })
        })
        .transpose()
}

/// Read contract creation bytecode from a compiled artifact.
///
/// Accepts Hardhat-style (`"bytecode": "0x.."`) and Foundry-style
/// (`"bytecode": { "object": "0x.." }`) JSON.
pub fn load_bytecode(path: &Path) -> EthereumResult<Bytes> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| EthereumError::Artifact(format!("{}: {}", path.display(), e)))?;
    parse_bytecode(&content)
}

fn parse_bytecode(content: &str) -> EthereumResult<Bytes> {
    let artifact: serde_json::Value =
        serde_json::from_str(content).map_err(|e| EthereumError::Artifact(e.to_string()))?;

    let bytecode = artifact
        .get("bytecode")
        .and_then(|b| b.as_str().or_else(|| b.get("object").and_then(|o| o.as_str())))
        .ok_or_else(|| EthereumError::Artifact("no bytecode field".to_string()))?;

    let code = hex::decode(bytecode.trim_start_matches("0x"))
        .map_err(|e| EthereumError::Artifact(format!("bytecode is not hex: {}", e)))?;
    if code.is_empty() {
        return Err(EthereumError::Artifact("bytecode is empty".to_string()));
    }
    Ok(Bytes::from(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hardhat_artifact() {
        let code = parse_bytecode(r#"{"contractName":"CTC","bytecode":"0x6080604052"}"#).unwrap();
        assert_eq!(code.to_vec(), vec![0x60u8, 0x80, 0x60, 0x40, 0x52]);
    }

    #[test]
    fn test_parse_foundry_artifact() {
        let code = parse_bytecode(r#"{"bytecode":{"object":"0x6080"}}"#).unwrap();
        assert_eq!(code.len(), 2);
    }

    #[test]
    fn test_parse_bad_artifacts() {
        assert!(parse_bytecode("not json").is_err());
        assert!(parse_bytecode(r#"{"abi":[]}"#).is_err());
        assert!(parse_bytecode(r#"{"bytecode":"0x"}"#).is_err());
        assert!(parse_bytecode(r#"{"bytecode":"0xzz"}"#).is_err());
    }

    #[test]
    fn test_burn_call_encoding() {
        let call = ICreditcoinToken::burnCall {
            value: U256::from(3u64) * CREDO_PER_CTC,
        };
        let encoded = call.abi_encode();
        // 4 bytes selector + 32 bytes uint256
        assert_eq!(encoded.len(), 36);
        // burn(uint256) selector = 0x42966c68
        assert_eq!(&encoded[..4], &[0x42, 0x96, 0x6c, 0x68]);
    }

    #[tokio::test]
    async fn test_requires_address_or_artifact() {
        let config = EthereumConfig {
            node_url: "http://127.0.0.1:9".to_string(),
            ..EthereumConfig::default()
        };
        let err = deploy_ctc_contract(&config, CREDO_PER_CTC).await.unwrap_err();
        assert!(matches!(err, EthereumError::Artifact(_)));
    }

    #[tokio::test]
    async fn test_existing_burn_requires_configuration() {
        let mut config = EthereumConfig {
            node_url: "http://127.0.0.1:9".to_string(),
            ..EthereumConfig::default()
        };
        let err = existing_burn(&config).await.unwrap_err();
        assert!(matches!(err, EthereumError::InvalidInput { what: "contract address", .. }));

        config.ctc_contract_address = Some("0x1234".to_string());
        let err = existing_burn(&config).await.unwrap_err();
        assert!(matches!(err, EthereumError::InvalidInput { what: "contract address", .. }));

        config.ctc_contract_address = Some(format!("0x{}", "11".repeat(20)));
        let err = existing_burn(&config).await.unwrap_err();
        assert!(matches!(err, EthereumError::InvalidInput { what: "burn transaction hash", .. }));

        config.ctc_burn_tx_hash = Some("0xabc".to_string());
        let err = existing_burn(&config).await.unwrap_err();
        assert!(matches!(err, EthereumError::InvalidInput { what: "burn transaction hash", .. }));
    }

    #[tokio::test]
    async fn test_existing_burn_queries_node() {
        let config = EthereumConfig {
            node_url: "http://127.0.0.1:9".to_string(),
            ctc_contract_address: Some(format!("0x{}", "11".repeat(20))),
            ctc_burn_tx_hash: Some(format!("0x{}", "ab".repeat(32))),
            ..EthereumConfig::default()
        };
        let err = existing_burn(&config).await.unwrap_err();
        assert!(matches!(err, EthereumError::Rpc(_) | EthereumError::Timeout(_)));
    }
}
