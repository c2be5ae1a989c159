//! Dynamic extrinsic payloads for the calls this crate submits.

use alloy::primitives::{Address, B256};
use alloy::signers::Signature;
use subxt::dynamic::Value;
use subxt::tx::DynamicPayload;
use subxt::utils::AccountId32;

use crate::chain::types::Blockchain;

/// `Balances.transfer_keep_alive(dest, value)`.
pub fn transfer(dest: &AccountId32, amount: u128) -> DynamicPayload {
    subxt::dynamic::tx(
        "Balances",
        "transfer_keep_alive",
        vec![
            Value::unnamed_variant("Id", [Value::from_bytes(dest.0)]),
            Value::u128(amount),
        ],
    )
}

/// `Creditcoin.request_collect_coins(evm_address, tx_id)`.
pub fn request_collect_coins(external_address: Address, burn_tx_hash: B256) -> DynamicPayload {
    subxt::dynamic::tx(
        "Creditcoin",
        "request_collect_coins",
        vec![
            Value::from_bytes(external_address.as_slice()),
            Value::from_bytes(burn_tx_hash.as_slice()),
        ],
    )
}

/// `Creditcoin.register_address(blockchain, address, ownership_proof)`.
pub fn register_address(
    blockchain: Blockchain,
    external_address: Address,
    ownership_proof: &Signature,
) -> DynamicPayload {
    subxt::dynamic::tx(
        "Creditcoin",
        "register_address",
        vec![
            blockchain.to_value(),
            Value::from_bytes(external_address.as_slice()),
            Value::from_bytes(ownership_proof.as_bytes()),
        ],
    )
}

/// `Sudo.sudo(Creditcoin.add_authority(who))`.
pub fn add_authority(who: &AccountId32) -> DynamicPayload {
    sudo(creditcoin_call(
        "add_authority",
        vec![("who", Value::from_bytes(who.0))],
    ))
}

/// `Sudo.sudo(Creditcoin.set_collect_coins_contract(contract))`.
pub fn set_collect_coins_contract(contract: Address, blockchain: Blockchain) -> DynamicPayload {
    let contract = Value::named_composite([
        ("address", Value::from_bytes(contract.as_slice())),
        ("chain", blockchain.to_value()),
    ]);
    sudo(creditcoin_call("set_collect_coins_contract", vec![("contract", contract)]))
}

/// Wrap a runtime call value in `Sudo.sudo`.
pub fn sudo(call: Value) -> DynamicPayload {
    subxt::dynamic::tx("Sudo", "sudo", vec![call])
}

/// A `RuntimeCall::Creditcoin(..)` value with named fields.
fn creditcoin_call(name: &str, fields: Vec<(&str, Value)>) -> Value {
    Value::unnamed_variant("Creditcoin", [Value::named_variant(name, fields)])
}
