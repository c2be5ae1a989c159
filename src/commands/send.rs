//! `send`: transfer CTC between ledger accounts.

use alloy::primitives::U256;
use subxt_signer::sr25519::Keypair;

use creditcoin_cli::chain::{calls, parse_account_id, CreditcoinClient};
use creditcoin_cli::units::to_ctc_string;

use super::{CommandError, CommandResult};

pub async fn run(
    client: &CreditcoinClient,
    signer: &Keypair,
    to: &str,
    amount: U256,
) -> CommandResult<()> {
    let dest = parse_account_id(to)?;
    let value = u128::try_from(amount).map_err(|_| CommandError::AmountTooLarge(amount.to_string()))?;

    println!("Sending {} to {}", to_ctc_string(amount), to);

    let events = client.sign_and_submit(&calls::transfer(&dest, value), signer).await?;
    println!("Transfer finalized in block {:?}", events.block_hash());
    Ok(())
}
