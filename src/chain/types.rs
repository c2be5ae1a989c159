//! Ledger-specific types and error definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use subxt::dynamic::Value;
use subxt::error::DispatchError;
use thiserror::Error;

// Re-export LedgerConfig from config module to avoid duplication
pub use crate::config::schema::LedgerConfig;

/// External chain an address is registered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Blockchain {
    #[default]
    Ethereum,
    Rinkeby,
    Luniverse,
    Bitcoin,
}

impl Blockchain {
    /// Variant name as known to the runtime.
    pub fn as_str(&self) -> &'static str {
        match self {
            Blockchain::Ethereum => "Ethereum",
            Blockchain::Rinkeby => "Rinkeby",
            Blockchain::Luniverse => "Luniverse",
            Blockchain::Bitcoin => "Bitcoin",
        }
    }

    /// Dynamic value for use in extrinsic payloads.
    pub fn to_value(&self) -> Value {
        Value::unnamed_variant(self.as_str(), Vec::<Value>::new())
    }
}

impl fmt::Display for Blockchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Blockchain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ethereum" => Ok(Blockchain::Ethereum),
            "rinkeby" => Ok(Blockchain::Rinkeby),
            "luniverse" => Ok(Blockchain::Luniverse),
            "bitcoin" => Ok(Blockchain::Bitcoin),
            other => Err(format!("unknown blockchain '{}'", other)),
        }
    }
}

impl TryFrom<String> for Blockchain {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Blockchain> for String {
    fn from(chain: Blockchain) -> Self {
        chain.as_str().to_string()
    }
}

/// The `data` part of a `System.Account` entry, in smallest units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountData {
    pub free: u128,
    pub reserved: u128,
    pub misc_frozen: u128,
    pub fee_frozen: u128,
}

/// Identifier the ledger assigns to a collect-coins request.
pub type CollectedCoinsId = [u8; 32];

/// Final state of a collect-coins request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectCoinsOutcome {
    /// The burn was verified and the coins minted.
    Minted { id: CollectedCoinsId, block_number: u64 },
    /// The offchain worker rejected the request.
    FailedVerification { id: CollectedCoinsId, cause: String },
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Connection or RPC request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// A pallet rejected the extrinsic with one of its declared errors.
    #[error("Extrinsic failed: {pallet}::{error}")]
    Module { pallet: String, error: String },

    /// The extrinsic was included but failed to dispatch for another reason.
    #[error("Extrinsic failed: {0}")]
    Dispatch(String),

    /// Malformed SS58 or external address.
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Secret could not be turned into a keypair.
    #[error("Keyring error: {0}")]
    Keyring(String),

    /// The external wallet could not sign the ownership proof.
    #[error("Ownership proof error: {0}")]
    OwnershipProof(String),

    /// A response did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// An expected event was never observed.
    #[error("Timed out after {secs} seconds waiting for {what}")]
    WaitTimeout { what: String, secs: u64 },
}

impl ChainError {
    /// True if a pallet rejected the extrinsic with the error variant `name`.
    pub fn is_module_error(&self, name: &str) -> bool {
        matches!(self, ChainError::Module { error, .. } if error == name)
    }
}

impl From<subxt::Error> for ChainError {
    fn from(err: subxt::Error) -> Self {
        match err {
            subxt::Error::Runtime(dispatch) => {
                if let DispatchError::Module(module) = &dispatch {
                    if let Ok(details) = module.details() {
                        return ChainError::Module {
                            pallet: details.pallet.name().to_string(),
                            error: details.variant.name.to_string(),
                        };
                    }
                }
                ChainError::Dispatch(dispatch.to_string())
            }
            other => ChainError::Rpc(other.to_string()),
        }
    }
}

/// Result type for ledger operations.
pub type ChainResult<T> = Result<T, ChainError>;
