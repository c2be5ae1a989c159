use creditcoin_cli::balance::{get_balance, print_balance};
use creditcoin_cli::chain::CreditcoinClient;

use super::CommandResult;

pub async fn run(client: &CreditcoinClient, address: &str) -> CommandResult<()> {
    let balance = get_balance(address, client).await?;
    print_balance(&balance);
    Ok(())
}
