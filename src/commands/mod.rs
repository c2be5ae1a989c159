//! Subcommand implementations for `cc-cli`.

pub mod balance;
pub mod collect_coins;
pub mod send;

use subxt_signer::sr25519::Keypair;
use thiserror::Error;

use creditcoin_cli::chain::keyring::SECRET_ENV_VAR;
use creditcoin_cli::chain::{keypair_from_secret, ChainError};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0} is not set; it must hold the signer's mnemonic or secret URI")]
    MissingSecret(&'static str),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("amount {0} does not fit in a ledger balance")]
    AmountTooLarge(String),

    #[error("collect coins request {id} failed verification: {cause}")]
    VerificationFailed { id: String, cause: String },
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Signer keypair from the `CC_SECRET` environment variable.
pub fn signer_from_env() -> CommandResult<Keypair> {
    let secret = std::env::var(SECRET_ENV_VAR)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .ok_or(CommandError::MissingSecret(SECRET_ENV_VAR))?;
    Ok(keypair_from_secret(secret.trim())?)
}
