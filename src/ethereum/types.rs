//! Ethereum error definitions.

use thiserror::Error;

// Re-export EthereumConfig from config module to avoid duplication
pub use crate::config::schema::EthereumConfig;

/// Errors that can occur during Ethereum operations.
#[derive(Debug, Error)]
pub enum EthereumError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Invalid private key format or signing error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Contract artifact missing or malformed.
    #[error("Contract artifact error: {0}")]
    Artifact(String),

    /// Malformed address or hash in configuration.
    #[error("Invalid {what} '{value}'")]
    InvalidInput { what: &'static str, value: String },
}

/// Result type for Ethereum operations.
pub type EthereumResult<T> = Result<T, EthereumError>;
