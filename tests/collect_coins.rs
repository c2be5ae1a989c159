//! End-to-end collect-coins: burn CTC on Ethereum, claim it on the ledger
//! through the `cc-cli` binary.
//!
//! Needs a ledger dev node, an Ethereum node and either a CTC contract
//! address or artifact. Setup is gated on `execute_setup_authority`.

use std::time::Duration;

use alloy::primitives::U256;

use creditcoin_cli::balance::get_balance;
use creditcoin_cli::chain::keyring::TestAccount;
use creditcoin_cli::chain::register::try_register_address;
use creditcoin_cli::config::NetworkConfig;
use creditcoin_cli::ethereum::{deploy_ctc_contract, existing_burn, Wallet, CREDO_PER_CTC};
use creditcoin_cli::units::parse_ctc_string;

mod common;

const TEST_TIMEOUT: Duration = Duration::from_secs(900);
/// CTC burned on Ethereum and then claimed.
const BURN_CTC: u64 = 3;
/// CTC given to the claiming account to pay fees.
const FUNDING_CTC: &str = "5";

#[test]
fn test_flow_amounts() {
    let burned = U256::from(BURN_CTC) * CREDO_PER_CTC;
    assert_eq!(burned, parse_ctc_string("3").unwrap());
    assert_eq!(burned.to_string(), "3000000000000000000");

    let funding = parse_ctc_string(FUNDING_CTC).unwrap();
    assert_eq!(funding, U256::from(5u64) * CREDO_PER_CTC);
}

#[tokio::test]
#[ignore = "requires ledger and Ethereum nodes"]
async fn test_collect_coins_end_to_end() {
    let config = common::network_config();
    if !config.ledger.execute_setup_authority {
        eprintln!("execute_setup_authority is off; skipping");
        return;
    }

    tokio::time::timeout(TEST_TIMEOUT, collect_coins_flow(config))
        .await
        .expect("collect coins flow finished in time");
}

async fn collect_coins_flow(config: NetworkConfig) {
    let client = common::connect(&config).await;
    common::set_authorities(&client).await.expect("sudo is an authority");

    let deployed = match &config.ethereum.ctc_burn_tx_hash {
        Some(_) => existing_burn(&config.ethereum)
            .await
            .expect("configured burn transaction succeeded"),
        None => deploy_ctc_contract(&config.ethereum, U256::from(BURN_CTC) * CREDO_PER_CTC)
            .await
            .expect("CTC deployed and burned"),
    };
    common::set_collect_coins_contract(&client, deployed.address, config.ethereum.chain)
        .await
        .expect("collect coins contract configured");

    let wallet = Wallet::from_private_key(&config.ethereum.ctc_deployer_private_key).unwrap();
    let account = TestAccount::random().unwrap();
    let funding = parse_ctc_string(FUNDING_CTC).unwrap();
    common::fund_from_sudo(&client, &account.account_id(), funding).await;
    try_register_address(
        &client,
        &wallet,
        config.ethereum.chain,
        account.keypair(),
        config.ledger.reuse_existing_addresses,
    )
    .await
    .expect("external address registered");

    let before = get_balance(&account.address(), &client).await.unwrap();

    let external_address = wallet.address().to_string();
    let burn_tx_hash = deployed.burn_tx_hash.to_string();
    let verification_timeout = config.ledger.verification_timeout_secs.to_string();
    let output = common::run_cc_cli(
        &[
            "--url",
            &config.ledger.api_url,
            "collect-coins",
            "--external-address",
            &external_address,
            "--burn-tx-hash",
            &burn_tx_hash,
            "--verification-timeout",
            &verification_timeout,
        ],
        Some(account.secret()),
    )
    .await;

    let stdout = common::stdout(&output);
    assert!(output.status.success(), "cc-cli failed:\n{}", common::stderr(&output));
    assert_eq!(common::stderr(&output), "");
    assert_eq!(stdout.trim_end().lines().last(), Some("Success!"));

    client
        .wait_for_elapsed_blocks(config.ledger.elapsed_blocks, Duration::from_secs(120))
        .await
        .unwrap();
    let after = get_balance(&account.address(), &client).await.unwrap();
    assert!(after.total() > before.total());
}
