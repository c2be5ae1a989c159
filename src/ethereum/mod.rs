//! Ethereum side of collect-coins.
//!
//! # Data Flow
//! ```text
//! Deployer private key (config)
//!     → wallet.rs (key loading, signing, ownership proofs)
//!     → client.rs (RPC connection with timeouts, send and confirm)
//!     → ctc.rs (deploy the CTC token and burn, or reuse a configured burn)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod ctc;
pub mod types;
pub mod wallet;

pub use client::EthereumClient;
pub use ctc::{deploy_ctc_contract, existing_burn, DeployedCtc, CREDO_PER_CTC};
pub use types::{EthereumConfig, EthereumError, EthereumResult};
pub use wallet::Wallet;
