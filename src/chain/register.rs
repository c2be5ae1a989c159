//! Registering an external address with a ledger account.

use subxt_signer::sr25519::Keypair;

use crate::chain::calls;
use crate::chain::client::CreditcoinClient;
use crate::chain::keyring::account_id;
use crate::chain::types::{Blockchain, ChainError, ChainResult};
use crate::ethereum::Wallet;

/// Pallet error returned when the address is already taken.
const ALREADY_REGISTERED: &str = "AddressAlreadyRegistered";

/// Whether a registration created a new entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Registered,
    AlreadyRegistered,
}

/// Register `wallet`'s address on `blockchain` as owned by `owner`.
///
/// The ownership proof is the wallet's signature over the blake2-256 hash of
/// the owner's account id. With `reuse_existing`, an address that is already
/// registered is not an error.
pub async fn try_register_address(
    client: &CreditcoinClient,
    wallet: &Wallet,
    blockchain: Blockchain,
    owner: &Keypair,
    reuse_existing: bool,
) -> ChainResult<Registration> {
    let owner_id = account_id(owner);
    let proof = wallet
        .sign_account_id(&owner_id.0)
        .await
        .map_err(|e| ChainError::OwnershipProof(e.to_string()))?;

    let call = calls::register_address(blockchain, wallet.address(), &proof);
    let submitted = client.sign_and_submit(&call, owner).await.map(|_| ());
    let registration = registration_outcome(submitted, reuse_existing)?;

    match registration {
        Registration::Registered => tracing::info!(
            external_address = %wallet.address(),
            owner = %owner_id,
            blockchain = %blockchain,
            "External address registered"
        ),
        Registration::AlreadyRegistered => {
            tracing::info!(external_address = %wallet.address(), "Reusing registered address")
        }
    }
    Ok(registration)
}

/// Decide what a `register_address` submission result means.
fn registration_outcome(submitted: ChainResult<()>, reuse_existing: bool) -> ChainResult<Registration> {
    match submitted {
        Ok(()) => Ok(Registration::Registered),
        Err(e) if reuse_existing && e.is_module_error(ALREADY_REGISTERED) => {
            Ok(Registration::AlreadyRegistered)
        }
        Err(e) => Err(e),
    }
}
