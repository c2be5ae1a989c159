//! Creditcoin ledger integration.
//!
//! # Data Flow
//! ```text
//! CC_SECRET / secret URI
//!     → keyring.rs (sr25519 keypair)
//!     → calls.rs (dynamic extrinsic payloads)
//!     → client.rs (submit, query storage, follow finalized blocks)
//!     → collect_coins.rs / register.rs (multi-step flows)
//!     → setup.rs (sudo configuration of test networks)
//! ```
//!
//! All chain access goes through `subxt`'s dynamic API, so no generated
//! runtime metadata is needed at build time.
//!
//! # Security Constraints
//! - Secrets come from the environment or test fixtures only
//! - Secrets and keypairs are never logged

pub mod calls;
pub mod client;
pub mod collect_coins;
pub mod keyring;
pub mod register;
pub mod setup;
pub mod types;

pub use client::CreditcoinClient;
pub use keyring::{keypair_from_secret, parse_account_id, TestAccount};
pub use types::{AccountData, Blockchain, ChainError, ChainResult, CollectCoinsOutcome};
