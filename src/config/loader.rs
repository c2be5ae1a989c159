//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::config::schema::NetworkConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: String, message: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, message } => write!(f, "Invalid value for {}: {}", var, message),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load a TOML file, apply `CREDITCOIN_*` environment overrides, and validate.
pub fn load_config(path: &Path) -> Result<NetworkConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config: NetworkConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    apply_overrides(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build a configuration from defaults and `CREDITCOIN_*` environment variables.
pub fn from_env() -> Result<NetworkConfig, ConfigError> {
    let mut config = NetworkConfig::default();

    apply_overrides(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Override individual fields from `lookup`, keyed by environment variable name.
///
/// Empty values are treated as unset.
pub fn apply_overrides<F>(config: &mut NetworkConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("CREDITCOIN_API_URL") {
        config.ledger.api_url = v;
    }
    if let Some(v) = get("CREDITCOIN_RPC_TIMEOUT_SECS") {
        config.ledger.rpc_timeout_secs = parse_var("CREDITCOIN_RPC_TIMEOUT_SECS", &v)?;
    }
    if let Some(v) = get("CREDITCOIN_FINALIZATION_TIMEOUT_SECS") {
        config.ledger.finalization_timeout_secs = parse_var("CREDITCOIN_FINALIZATION_TIMEOUT_SECS", &v)?;
    }
    if let Some(v) = get("CREDITCOIN_EXECUTE_SETUP_AUTHORITY") {
        config.ledger.execute_setup_authority = parse_flag("CREDITCOIN_EXECUTE_SETUP_AUTHORITY", &v)?;
    }
    if let Some(v) = get("CREDITCOIN_REUSE_EXISTING_ADDRESSES") {
        config.ledger.reuse_existing_addresses = parse_flag("CREDITCOIN_REUSE_EXISTING_ADDRESSES", &v)?;
    }
    if let Some(v) = get("CREDITCOIN_ETHEREUM_NODE_URL") {
        config.ethereum.node_url = v;
    }
    if let Some(v) = get("CREDITCOIN_ETHEREUM_CHAIN") {
        config.ethereum.chain = parse_var("CREDITCOIN_ETHEREUM_CHAIN", &v)?;
    }
    if let Some(v) = get("CREDITCOIN_CTC_CONTRACT_ADDRESS") {
        config.ethereum.ctc_contract_address = Some(v);
    }
    if let Some(v) = get("CREDITCOIN_CTC_CONTRACT_ARTIFACT") {
        config.ethereum.ctc_contract_artifact = Some(v);
    }
    if let Some(v) = get("CREDITCOIN_CTC_DEPLOYER_PRIVATE_KEY") {
        config.ethereum.ctc_deployer_private_key = v;
    }
    if let Some(v) = get("CREDITCOIN_CTC_BURN_TX_HASH") {
        config.ethereum.ctc_burn_tx_hash = Some(v);
    }
    if let Some(v) = get("CREDITCOIN_LOG_LEVEL") {
        config.observability.log_level = v;
    }
    if let Some(v) = get("CREDITCOIN_METRICS_URL") {
        config.observability.metrics_url = v;
    }

    Ok(())
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Env {
        var: var.to_string(),
        message: e.to_string(),
    })
}

fn parse_flag(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(ConfigError::Env {
            var: var.to_string(),
            message: format!("expected a boolean, got '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::types::Blockchain;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: NetworkConfig = toml::from_str(
            r#"
            [ledger]
            api_url = "ws://node:9944"

            [ethereum]
            chain = "luniverse"
            "#,
        )
        .unwrap();

        assert_eq!(config.ledger.api_url, "ws://node:9944");
        assert_eq!(config.ledger.rpc_timeout_secs, 30);
        assert_eq!(config.ethereum.chain, Blockchain::Luniverse);
        assert_eq!(config.ethereum.node_url, "http://127.0.0.1:8545");
        assert_eq!(config.observability.metrics_url, "http://127.0.0.1:9615");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = NetworkConfig::default();
        apply_overrides(
            &mut config,
            lookup(&[
                ("CREDITCOIN_API_URL", "ws://10.0.0.1:9944"),
                ("CREDITCOIN_EXECUTE_SETUP_AUTHORITY", "true"),
                ("CREDITCOIN_ETHEREUM_CHAIN", "Rinkeby"),
                ("CREDITCOIN_CTC_BURN_TX_HASH", "0xabc"),
                ("CREDITCOIN_CTC_CONTRACT_ADDRESS", ""),
                ("CREDITCOIN_FINALIZATION_TIMEOUT_SECS", "45"),
                ("CREDITCOIN_LOG_LEVEL", "creditcoin_cli=debug"),
            ]),
        )
        .unwrap();

        assert_eq!(config.ledger.api_url, "ws://10.0.0.1:9944");
        assert!(config.ledger.execute_setup_authority);
        assert_eq!(config.ethereum.chain, Blockchain::Rinkeby);
        assert_eq!(config.ethereum.ctc_burn_tx_hash.as_deref(), Some("0xabc"));
        assert!(config.ethereum.ctc_contract_address.is_none());
        assert_eq!(config.ledger.finalization_timeout_secs, 45);
        assert_eq!(config.observability.log_level, "creditcoin_cli=debug");
    }

    #[test]
    fn test_env_override_errors() {
        let mut config = NetworkConfig::default();
        let err = apply_overrides(&mut config, lookup(&[("CREDITCOIN_RPC_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("CREDITCOIN_RPC_TIMEOUT_SECS"));

        let err = apply_overrides(
            &mut config,
            lookup(&[("CREDITCOIN_REUSE_EXISTING_ADDRESSES", "maybe")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("expected a boolean"));
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("cc-cli-{}.toml", uuid::Uuid::new_v4()));
        fs::write(
            &path,
            r#"
            [ledger]
            rpc_timeout_secs = 5
            reuse_existing_addresses = true
            "#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.ledger.rpc_timeout_secs, 5);
        assert!(config.ledger.reuse_existing_addresses);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/nonexistent/cc-cli.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
