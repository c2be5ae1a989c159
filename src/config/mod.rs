//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! network.toml (optional)
//!     → loader.rs (parse & deserialize)
//!     → CREDITCOIN_* environment variables (per-field overrides)
//!     → validation.rs (semantic checks)
//!     → NetworkConfig (validated, immutable)
//! ```
//!
//! The CLI itself takes its settings from flags and environment variables
//! (see `main.rs`); `NetworkConfig` describes the network the integration
//! tests run against.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_overrides, from_env, load_config, ConfigError};
pub use schema::{EthereumConfig, LedgerConfig, NetworkConfig, ObservabilityConfig};
