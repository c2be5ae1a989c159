//! Configuration validation.
//!
//! Serde handles syntax; this pass checks URLs, keys and hashes and returns
//! every problem found, not just the first.

use std::fmt;

use alloy::primitives::{Address, B256};

use crate::config::schema::NetworkConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration.
pub fn validate_config(config: &NetworkConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut push = |field: &'static str, message: String| {
        errors.push(ValidationError { field, message });
    };

    if let Err(message) = check_url(&config.ledger.api_url, &["ws", "wss", "http", "https"]) {
        push("ledger.api_url", message);
    }
    if config.ledger.rpc_timeout_secs == 0 {
        push("ledger.rpc_timeout_secs", "must be greater than zero".to_string());
    }
    if config.ledger.finalization_timeout_secs == 0 {
        push("ledger.finalization_timeout_secs", "must be greater than zero".to_string());
    }
    if config.ledger.verification_timeout_secs == 0 {
        push("ledger.verification_timeout_secs", "must be greater than zero".to_string());
    }

    if let Err(message) = check_url(&config.ethereum.node_url, &["http", "https", "ws", "wss"]) {
        push("ethereum.node_url", message);
    }
    if config.ethereum.rpc_timeout_secs == 0 {
        push("ethereum.rpc_timeout_secs", "must be greater than zero".to_string());
    }
    if config.ethereum.confirmation_timeout_secs == 0 {
        push("ethereum.confirmation_timeout_secs", "must be greater than zero".to_string());
    }
    if let Some(address) = &config.ethereum.ctc_contract_address {
        if address.parse::<Address>().is_err() {
            push("ethereum.ctc_contract_address", format!("'{}' is not an address", address));
        }
    }
    if let Some(hash) = &config.ethereum.ctc_burn_tx_hash {
        if hash.parse::<B256>().is_err() {
            push("ethereum.ctc_burn_tx_hash", format!("'{}' is not a 32-byte hash", hash));
        }
    }
    let key = &config.ethereum.ctc_deployer_private_key;
    let key_hex = key.strip_prefix("0x").unwrap_or(key);
    if key_hex.len() != 64 || hex::decode(key_hex).is_err() {
        // Never echo the key itself.
        push("ethereum.ctc_deployer_private_key", "expected 32 hex-encoded bytes".to_string());
    }

    if config.observability.log_level.trim().is_empty() {
        push("observability.log_level", "must not be empty".to_string());
    }
    if let Err(message) = check_url(&config.observability.metrics_url, &["http", "https"]) {
        push("observability.metrics_url", message);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(raw: &str, schemes: &[&str]) -> Result<(), String> {
    let url = url::Url::parse(raw).map_err(|e| format!("invalid URL '{}': {}", raw, e))?;
    if !schemes.contains(&url.scheme()) {
        return Err(format!(
            "unsupported scheme '{}', expected one of {}",
            url.scheme(),
            schemes.join(", ")
        ));
    }
    Ok(())
}
