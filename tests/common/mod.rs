//! Shared utilities for integration and end-to-end tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::process::Output;

use alloy::primitives::{Address, U256};
use metrics_exporter_prometheus::PrometheusBuilder;
use subxt::utils::AccountId32;
use tokio::net::TcpListener;
use tokio::process::Command;

use creditcoin_cli::chain::types::{Blockchain, ChainResult};
use creditcoin_cli::chain::{calls, keyring, setup, CreditcoinClient};
use creditcoin_cli::config::{from_env, load_config, NetworkConfig};
use creditcoin_cli::observability::logging::init_logging;
use creditcoin_cli::resilience::RetryPolicy;

/// Test network configuration: `CREDITCOIN_CONFIG` points at a TOML file,
/// otherwise defaults plus `CREDITCOIN_*` overrides. Also installs the
/// test subscriber at the configured log level.
pub fn network_config() -> NetworkConfig {
    let config = match std::env::var("CREDITCOIN_CONFIG") {
        Ok(path) => load_config(Path::new(&path)),
        Err(_) => from_env(),
    };
    let config = config.expect("valid test network configuration");
    init_logging(&config.observability.log_level);
    config
}

pub async fn connect(config: &NetworkConfig) -> CreditcoinClient {
    CreditcoinClient::from_config(&config.ledger)
        .await
        .expect("ledger node reachable")
}

/// Transfer `amount` smallest units from the sudo account to `dest`.
pub async fn fund_from_sudo(client: &CreditcoinClient, dest: &AccountId32, amount: U256) {
    let value = u128::try_from(amount).expect("amount fits in a ledger balance");
    client
        .sign_and_submit(&calls::transfer(dest, value), &keyring::sudo())
        .await
        .expect("funding transfer");
}

/// Make the sudo account an offchain-worker authority.
pub async fn set_authorities(client: &CreditcoinClient) -> ChainResult<()> {
    let sudo = keyring::sudo();
    setup::add_authority(client, &sudo, &keyring::account_id(&sudo), RetryPolicy::default()).await
}

/// Point the ledger at the CTC contract whose burns it should honour.
pub async fn set_collect_coins_contract(
    client: &CreditcoinClient,
    contract: Address,
    blockchain: Blockchain,
) -> ChainResult<()> {
    setup::set_collect_coins_contract(client, &keyring::sudo(), contract, blockchain).await
}

/// Prometheus text exposition resembling a dev node's.
pub fn render_node_metrics(hash_count: u64) -> String {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    metrics::with_local_recorder(&recorder, || {
        metrics::counter!("creditcoin_node_hash_count", "chain" => "dev").increment(hash_count);
        metrics::gauge!("substrate_block_height", "status" => "best", "chain" => "dev").set(42.0);
    });

    handle.render()
}

/// Serve `body` at `GET /metrics` on an ephemeral port.
pub async fn start_metrics_fixture(body: String) -> SocketAddr {
    let app = axum::Router::new().route(
        "/metrics",
        axum::routing::get(move || {
            let body = body.clone();
            async move { body }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Run the `cc-cli` binary with a clean logging and secret environment.
pub async fn run_cc_cli(args: &[&str], secret: Option<&str>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_cc-cli"));
    command
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("CREDITCOIN_API_URL")
        .env_remove(keyring::SECRET_ENV_VAR);
    if let Some(secret) = secret {
        command.env(keyring::SECRET_ENV_VAR, secret);
    }
    command.output().await.expect("cc-cli binary runs")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
