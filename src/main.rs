//! `cc-cli`: command line client for a Creditcoin ledger node.
//!
//! ```text
//! cc-cli [--url ws://..] balance --address <ss58>
//! cc-cli [--url ws://..] send --to <ss58> --amount <CTC>            (CC_SECRET)
//! cc-cli [--url ws://..] collect-coins --external-address <0x..>
//!                                      --burn-tx-hash <0x..>         (CC_SECRET)
//! ```
//!
//! Command output goes to stdout; logs and errors go to stderr.

mod commands;

use alloy::primitives::{Address, B256, U256};
use clap::{Parser, Subcommand};

use creditcoin_cli::chain::client::DEFAULT_FINALIZATION_TIMEOUT_SECS;
use creditcoin_cli::chain::{ChainError, CreditcoinClient};
use creditcoin_cli::observability::{init_logging, DEFAULT_LOG_LEVEL};
use creditcoin_cli::units::parse_ctc_string;

#[derive(Parser)]
#[command(name = "cc-cli", version)]
#[command(about = "Command line client for a Creditcoin ledger node", long_about = None)]
struct Cli {
    /// WebSocket RPC endpoint of the node
    #[arg(short, long, global = true, env = "CREDITCOIN_API_URL", default_value = "ws://127.0.0.1:9944")]
    url: String,

    /// RPC request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    /// Seconds to wait for a submitted extrinsic to be finalized
    #[arg(long, global = true, default_value_t = DEFAULT_FINALIZATION_TIMEOUT_SECS)]
    finalization_timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the balance of an account
    Balance {
        /// SS58 address of the account
        #[arg(short, long)]
        address: String,
    },
    /// Transfer CTC to another account (signer secret read from CC_SECRET)
    Send {
        /// SS58 address of the recipient
        #[arg(long)]
        to: String,

        /// Amount in CTC, e.g. `1.5`
        #[arg(long, value_parser = parse_ctc_string)]
        amount: U256,
    },
    /// Claim ledger credit for CTC burned on Ethereum (signer secret read from CC_SECRET)
    CollectCoins {
        /// Ethereum address that burned the tokens
        #[arg(long)]
        external_address: Address,

        /// Hash of the burn transaction
        #[arg(long)]
        burn_tx_hash: B256,

        /// Seconds to wait for the offchain worker's verdict
        #[arg(long, default_value_t = 800)]
        verification_timeout: u64,
    },
}

async fn connect(cli: &Cli) -> Result<CreditcoinClient, ChainError> {
    let client = CreditcoinClient::connect(&cli.url, cli.timeout).await?;
    Ok(client.with_finalization_timeout(cli.finalization_timeout))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(DEFAULT_LOG_LEVEL);

    let cli = Cli::parse();

    match &cli.command {
        Commands::Balance { address } => {
            let client = connect(&cli).await?;
            commands::balance::run(&client, address).await?;
        }
        Commands::Send { to, amount } => {
            let signer = commands::signer_from_env()?;
            let client = connect(&cli).await?;
            commands::send::run(&client, &signer, to, *amount).await?;
        }
        Commands::CollectCoins {
            external_address,
            burn_tx_hash,
            verification_timeout,
        } => {
            let signer = commands::signer_from_env()?;
            let client = connect(&cli).await?;
            commands::collect_coins::run(
                &client,
                &signer,
                *external_address,
                *burn_tx_hash,
                *verification_timeout,
            )
            .await?;
        }
    }

    Ok(())
}
