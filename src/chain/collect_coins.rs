//! Claiming ledger credit for a burn on the Ethereum side.
//!
//! The flow is:
//! 1. `request_collect_coins` is submitted and emits `CollectCoinsRegistered`
//!    carrying the request id.
//! 2. An offchain worker checks the burn transaction and later emits either
//!    `CollectedCoinsMinted` or `CollectCoinsFailedVerification` with the
//!    same id.

use std::time::Duration;

use alloy::primitives::{Address, B256};
use futures_util::{Stream, StreamExt};
use subxt::events::EventDetails;
use subxt::PolkadotConfig;
use subxt_signer::sr25519::Keypair;

use crate::chain::calls;
use crate::chain::client::{within, CreditcoinClient, LedgerBlock};
use crate::chain::types::{ChainError, ChainResult, CollectCoinsOutcome, CollectedCoinsId};

const PALLET: &str = "Creditcoin";
const REGISTERED: &str = "CollectCoinsRegistered";
const MINTED: &str = "CollectedCoinsMinted";
const FAILED: &str = "CollectCoinsFailedVerification";

/// Submit a collect-coins request and wait for the offchain worker's verdict.
pub async fn collect_coins(
    client: &CreditcoinClient,
    external_address: Address,
    burn_tx_hash: B256,
    signer: &Keypair,
    verification_timeout: Duration,
) -> ChainResult<CollectCoinsOutcome> {
    // Subscribe first so no block between registration and verification is missed.
    let mut blocks = client.subscribe_finalized().await?;

    let call = calls::request_collect_coins(external_address, burn_tx_hash);
    let events = client.sign_and_submit(&call, signer).await?;

    let id = events
        .iter()
        .find_map(|ev| match ev {
            Ok(ev) if is_event(&ev, REGISTERED) => Some(collected_coins_id(&ev)),
            Ok(_) => None,
            Err(e) => Some(Err(ChainError::from(e))),
        })
        .ok_or_else(|| ChainError::Decode(format!("no {} event emitted", REGISTERED)))??;

    tracing::info!(
        collected_coins_id = %hex::encode(id),
        external_address = %external_address,
        burn_tx_hash = %burn_tx_hash,
        "Collect coins request registered"
    );

    within(
        verification_timeout,
        || "collect coins verification".to_string(),
        wait_for_verdict(&mut blocks, id),
    )
    .await
}

/// What an event says about a pending collect-coins request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Minted,
    Failed,
}

/// The verdict carried by an event, if it is a minted or failed event for `id`.
fn verdict(pallet: &str, variant: &str, field_bytes: &[u8], id: &CollectedCoinsId) -> Option<Verdict> {
    if pallet != PALLET {
        return None;
    }
    let verdict = match variant {
        MINTED => Verdict::Minted,
        FAILED => Verdict::Failed,
        _ => return None,
    };
    (id_prefix(field_bytes)? == *id).then_some(verdict)
}

/// Scan finalized blocks for the minted or failed event carrying `id`.
async fn wait_for_verdict<S>(blocks: &mut S, id: CollectedCoinsId) -> ChainResult<CollectCoinsOutcome>
where
    S: Stream<Item = Result<LedgerBlock, subxt::Error>> + Unpin,
{
    while let Some(block) = blocks.next().await {
        let block = block?;
        let number = u64::from(block.number());
        let block_events = block.events().await?;

        for ev in block_events.iter() {
            let ev = ev.map_err(subxt::Error::from)?;
            let Some(kind) = verdict(ev.pallet_name(), ev.variant_name(), ev.field_bytes(), &id) else {
                continue;
            };

            let outcome = match kind {
                Verdict::Minted => CollectCoinsOutcome::Minted { id, block_number: number },
                Verdict::Failed => CollectCoinsOutcome::FailedVerification {
                    id,
                    cause: failure_cause(&ev),
                },
            };
            tracing::info!(block_number = number, outcome = ?outcome, "Collect coins verified");
            return Ok(outcome);
        }
    }
    Err(ChainError::Rpc("finalized block subscription ended".to_string()))
}

fn is_event(ev: &EventDetails<PolkadotConfig>, variant: &str) -> bool {
    ev.pallet_name() == PALLET && ev.variant_name() == variant
}

/// The request id is the first field of every collect-coins event.
fn collected_coins_id(ev: &EventDetails<PolkadotConfig>) -> ChainResult<CollectedCoinsId> {
    id_prefix(ev.field_bytes()).ok_or_else(|| {
        ChainError::Decode(format!("{} event is too short to carry an id", ev.variant_name()))
    })
}

fn id_prefix(bytes: &[u8]) -> Option<CollectedCoinsId> {
    bytes.get(..32)?.try_into().ok()
}

fn failure_cause(ev: &EventDetails<PolkadotConfig>) -> String {
    match ev.field_values() {
        Ok(fields) => fields
            .values()
            .nth(1)
            .map(|cause| cause.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        Err(e) => format!("undecodable cause: {}", e),
    }
}
