//! Sudo-driven configuration of a test network.
//!
//! Before collect-coins can work, the offchain worker needs an authority
//! and the ledger needs to know which CTC contract burns count.

use alloy::primitives::Address;
use subxt::utils::AccountId32;
use subxt_signer::sr25519::Keypair;

use crate::chain::calls;
use crate::chain::client::CreditcoinClient;
use crate::chain::types::{Blockchain, ChainResult};
use crate::resilience::{retry, RetryPolicy};

/// Pallet error returned when the account already is an authority.
const ALREADY_AN_AUTHORITY: &str = "AlreadyAnAuthority";

/// Make `who` an offchain-worker authority, signing the sudo call with `sudo`.
///
/// Retried under `policy` because a freshly started node may reject the
/// first calls. An account that already is an authority counts as success.
pub async fn add_authority(
    client: &CreditcoinClient,
    sudo: &Keypair,
    who: &AccountId32,
    policy: RetryPolicy,
) -> ChainResult<()> {
    let call = calls::add_authority(who);
    let call = &call;

    retry(policy, move || async move {
        authority_outcome(client.sign_and_submit(call, sudo).await.map(|_| ()))
    })
    .await?;

    tracing::info!(authority = %who, "Authority configured");
    Ok(())
}

fn authority_outcome(submitted: ChainResult<()>) -> ChainResult<()> {
    match submitted {
        Err(e) if e.is_module_error(ALREADY_AN_AUTHORITY) => Ok(()),
        other => other,
    }
}

/// Point the ledger at the CTC contract whose burns it should honour.
pub async fn set_collect_coins_contract(
    client: &CreditcoinClient,
    sudo: &Keypair,
    contract: Address,
    blockchain: Blockchain,
) -> ChainResult<()> {
    let call = calls::set_collect_coins_contract(contract, blockchain);
    client.sign_and_submit(&call, sudo).await?;

    tracing::info!(contract = %contract, blockchain = %blockchain, "Collect coins contract set");
    Ok(())
}
