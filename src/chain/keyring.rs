//! sr25519 key handling for ledger accounts.
//!
//! # Security
//! - Secrets are parsed and dropped; they are never logged
//! - Error messages describe the problem, not the secret

use std::str::FromStr;

use subxt::utils::AccountId32;
use subxt_signer::sr25519::{dev, Keypair};
use subxt_signer::SecretUri;

use crate::chain::types::{ChainError, ChainResult};

/// Environment variable the CLI reads the signing secret from.
pub const SECRET_ENV_VAR: &str = "CC_SECRET";

/// Build a keypair from a mnemonic phrase or secret URI (e.g. `//Alice`).
pub fn keypair_from_secret(secret: &str) -> ChainResult<Keypair> {
    let uri = SecretUri::from_str(secret.trim())
        .map_err(|e| ChainError::Keyring(format!("invalid secret: {}", e)))?;

    Keypair::from_uri(&uri).map_err(|e| ChainError::Keyring(format!("key derivation failed: {}", e)))
}

/// Account id of a keypair.
pub fn account_id(keypair: &Keypair) -> AccountId32 {
    keypair.public_key().to_account_id()
}

/// Parse an SS58 address.
pub fn parse_account_id(address: &str) -> ChainResult<AccountId32> {
    AccountId32::from_str(address.trim()).map_err(|e| ChainError::InvalidAddress {
        address: address.to_string(),
        reason: format!("{:?}", e),
    })
}

/// The development sudo account (`//Alice`).
pub fn sudo() -> Keypair {
    dev::alice()
}

/// A throwaway account whose secret can be handed to a subprocess.
#[derive(Clone)]
pub struct TestAccount {
    secret: String,
    keypair: Keypair,
}

impl TestAccount {
    /// Derive a fresh account from the development phrase.
    pub fn random() -> ChainResult<Self> {
        let secret = format!("//Alice//cc-cli-test-{}", uuid::Uuid::new_v4().simple());
        Self::from_secret(&secret)
    }

    /// Wrap an existing secret.
    pub fn from_secret(secret: &str) -> ChainResult<Self> {
        let keypair = keypair_from_secret(secret)?;
        Ok(Self {
            secret: secret.to_string(),
            keypair,
        })
    }

    /// The secret URI, suitable for `CC_SECRET`.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }

    pub fn account_id(&self) -> AccountId32 {
        account_id(&self.keypair)
    }

    /// SS58 address of the account.
    pub fn address(&self) -> String {
        self.account_id().to_string()
    }
}

impl std::fmt::Debug for TestAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestAccount")
            .field("address", &self.address())
            .finish()
    }
}
