//! Creditcoin command line client and test-network tooling.
//!
//! # Architecture Overview
//!
//! ```text
//!   cc-cli / integration tests
//!        │
//!        ├── units, balance ──────────── CTC amounts and account balances
//!        ├── chain ───────────────────── ledger node (subxt): queries, extrinsics, events
//!        ├── ethereum ────────────────── CTC token side (alloy): wallet, deploy, burn
//!        │
//!        └── cross-cutting: config, observability, resilience
//! ```

// Domain
pub mod balance;
pub mod chain;
pub mod ethereum;
pub mod units;

// Cross-cutting concerns
pub mod config;
pub mod observability;
pub mod resilience;

pub use balance::{get_balance, print_balance, Balance};
pub use chain::{ChainError, CreditcoinClient};
pub use config::NetworkConfig;
pub use units::{parse_ctc_string, to_ctc_string, to_microunits, UnitsError, MICROUNITS_PER_CTC};
