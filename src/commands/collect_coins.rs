//! `collect-coins`: claim ledger credit for CTC burned on Ethereum.
//!
//! On success the last line written to stdout is `Success!`.

use std::time::Duration;

use alloy::primitives::{Address, B256};
use subxt_signer::sr25519::Keypair;

use creditcoin_cli::chain::collect_coins::collect_coins;
use creditcoin_cli::chain::{CollectCoinsOutcome, CreditcoinClient};

use super::{CommandError, CommandResult};

pub async fn run(
    client: &CreditcoinClient,
    signer: &Keypair,
    external_address: Address,
    burn_tx_hash: B256,
    verification_timeout_secs: u64,
) -> CommandResult<()> {
    println!(
        "Collecting coins for {} from burn transaction {}",
        external_address, burn_tx_hash
    );

    let outcome = collect_coins(
        client,
        external_address,
        burn_tx_hash,
        signer,
        Duration::from_secs(verification_timeout_secs),
    )
    .await?;

    match outcome {
        CollectCoinsOutcome::Minted { id, block_number } => {
            println!("Collected coins {} minted in block {}", hex::encode(id), block_number);
            println!("Success!");
            Ok(())
        }
        CollectCoinsOutcome::FailedVerification { id, cause } => Err(CommandError::VerificationFailed {
            id: hex::encode(id),
            cause,
        }),
    }
}
