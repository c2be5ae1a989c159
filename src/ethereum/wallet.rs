//! Ethereum wallet for deployments and ownership proofs.
//!
//! # Security
//! - Keys are never logged or serialized
//! - Debug output shows the address only

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::{Signature, Signer};
use blake2_rfc::blake2b::blake2b;

use crate::ethereum::types::{EthereumError, EthereumResult};

/// Wallet holding a single secp256k1 key.
#[derive(Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key (with or without `0x`).
    pub fn from_private_key(private_key_hex: &str) -> EthereumResult<Self> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| EthereumError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::debug!(address = %signer.address(), "Wallet initialized");

        Ok(Self { signer })
    }

    /// The wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Signing wallet for alloy providers.
    pub fn network_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }

    /// Sign arbitrary message bytes (with the Ethereum personal-message prefix).
    pub async fn sign_message(&self, message: &[u8]) -> EthereumResult<Signature> {
        self.signer
            .sign_message(message)
            .await
            .map_err(|e| EthereumError::Wallet(format!("Message signing failed: {}", e)))
    }

    /// Prove ownership of this address to the ledger account `account_id`.
    ///
    /// Signs the blake2-256 hash of the raw 32-byte account id.
    pub async fn sign_account_id(&self, account_id: &[u8; 32]) -> EthereumResult<Signature> {
        let hash = blake2b(32, &[], account_id);
        self.sign_message(hash.as_bytes()).await
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet").field("address", &self.address()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

    #[test]
    fn test_wallet_from_private_key() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(wallet.address().to_string().to_lowercase(), TEST_ADDRESS);
    }

    #[test]
    fn test_wallet_with_0x_prefix() {
        let wallet = Wallet::from_private_key(&format!("0x{}", TEST_PRIVATE_KEY)).unwrap();
        assert_eq!(wallet.address().to_string().to_lowercase(), TEST_ADDRESS);
    }

    #[test]
    fn test_invalid_private_key() {
        let result = Wallet::from_private_key("invalid_key");
        assert!(result.unwrap_err().to_string().contains("Invalid private key"));
    }

    #[test]
    fn test_debug_shows_only_address() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let debug = format!("{:?}", wallet);
        assert!(!debug.contains(TEST_PRIVATE_KEY));
        assert!(debug.to_lowercase().contains(TEST_ADDRESS));
    }

    #[tokio::test]
    async fn test_sign_account_id_recovers_to_wallet() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let account_id = [7u8; 32];

        let signature = wallet.sign_account_id(&account_id).await.unwrap();
        assert_eq!(signature.as_bytes().len(), 65);

        let hash = blake2b(32, &[], &account_id);
        let recovered = signature
            .recover_address_from_msg(hash.as_bytes())
            .unwrap();
        assert_eq!(recovered, wallet.address());
    }
}
