//! Account balances as reported by the ledger.

use std::fmt;

use alloy::primitives::U256;

use crate::chain::types::{AccountData, ChainResult};
use crate::chain::{parse_account_id, CreditcoinClient};
use crate::units::to_ctc_string;

/// Balance of a ledger account, in smallest units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Balance {
    pub free: U256,
    pub reserved: U256,
    pub misc_frozen: U256,
    pub fee_frozen: U256,
}

impl Balance {
    /// Copy the balance fields out of an account query response.
    pub fn from_account_data(data: &AccountData) -> Self {
        Self {
            free: U256::from(data.free),
            reserved: U256::from(data.reserved),
            misc_frozen: U256::from(data.misc_frozen),
            fee_frozen: U256::from(data.fee_frozen),
        }
    }

    /// Free plus reserved funds.
    pub fn total(&self) -> U256 {
        self.free.saturating_add(self.reserved)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Free: {}", to_ctc_string(self.free))?;
        writeln!(f, "Reserved: {}", to_ctc_string(self.reserved))?;
        writeln!(f, "Misc Frozen: {}", to_ctc_string(self.misc_frozen))?;
        write!(f, "Fee Frozen: {}", to_ctc_string(self.fee_frozen))
    }
}

/// Query the balance of an SS58 address.
pub async fn get_balance(address: &str, client: &CreditcoinClient) -> ChainResult<Balance> {
    let account = parse_account_id(address)?;
    let data = client.account_data(&account).await?;
    Ok(Balance::from_account_data(&data))
}

/// Print a balance to stdout, one field per line.
pub fn print_balance(balance: &Balance) {
    println!("{}", balance);
}
