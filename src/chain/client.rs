//! Ledger RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the node's WebSocket RPC endpoint
//! - Query account state
//! - Sign, submit and wait for finalization of extrinsics
//! - Follow finalized blocks

use std::future::Future;
use std::time::Duration;

use futures_util::StreamExt;
use subxt::blocks::{Block, ExtrinsicEvents};
use subxt::dynamic::Value;
use subxt::ext::scale_value::At;
use subxt::tx::DynamicPayload;
use subxt::utils::AccountId32;
use subxt::{OnlineClient, PolkadotConfig};
use subxt_signer::sr25519::Keypair;
use tokio::time::timeout;

use crate::chain::types::{AccountData, ChainError, ChainResult, LedgerConfig};

/// A finalized block of the ledger.
pub type LedgerBlock = Block<PolkadotConfig, OnlineClient<PolkadotConfig>>;

/// How long a submitted extrinsic may take to be finalized.
pub const DEFAULT_FINALIZATION_TIMEOUT_SECS: u64 = 120;

/// Ledger RPC client.
#[derive(Clone)]
pub struct CreditcoinClient {
    api: OnlineClient<PolkadotConfig>,
    url: String,
    timeout_secs: u64,
    finalization_timeout: Duration,
}

impl CreditcoinClient {
    /// Connect to a node.
    ///
    /// Plain `ws://` URLs are accepted; test networks rarely run TLS.
    pub async fn connect(url: &str, timeout_secs: u64) -> ChainResult<Self> {
        let api = match timeout(
            Duration::from_secs(timeout_secs),
            OnlineClient::<PolkadotConfig>::from_insecure_url(url),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => return Err(ChainError::Timeout(timeout_secs)),
        };

        tracing::debug!(
            url = %url,
            spec_version = api.runtime_version().spec_version,
            "Connected to ledger node"
        );

        Ok(Self {
            api,
            url: url.to_string(),
            timeout_secs,
            finalization_timeout: Duration::from_secs(DEFAULT_FINALIZATION_TIMEOUT_SECS),
        })
    }

    /// Connect using a ledger configuration section.
    pub async fn from_config(config: &LedgerConfig) -> ChainResult<Self> {
        let client = Self::connect(&config.api_url, config.rpc_timeout_secs).await?;
        Ok(client.with_finalization_timeout(config.finalization_timeout_secs))
    }

    /// Bound how long [`sign_and_submit`](Self::sign_and_submit) waits for finalization.
    pub fn with_finalization_timeout(mut self, secs: u64) -> Self {
        self.finalization_timeout = Duration::from_secs(secs);
        self
    }

    /// Run a single RPC round trip under the configured deadline.
    async fn rpc<T, F>(&self, fut: F) -> ChainResult<T>
    where
        F: Future<Output = Result<T, subxt::Error>>,
    {
        match timeout(Duration::from_secs(self.timeout_secs), fut).await {
            Ok(result) => result.map_err(ChainError::from),
            Err(_) => Err(ChainError::Timeout(self.timeout_secs)),
        }
    }

    /// Read the `data` part of `System.Account` for `account`.
    ///
    /// Accounts that do not exist yet have an all-zero balance.
    pub async fn account_data(&self, account: &AccountId32) -> ChainResult<AccountData> {
        let query = subxt::dynamic::storage("System", "Account", vec![Value::from_bytes(account.0)]);
        let storage = self.rpc(self.api.storage().at_latest()).await?;
        let Some(info) = self.rpc(storage.fetch(&query)).await? else {
            return Ok(AccountData::default());
        };

        let info = info.to_value().map_err(|e| ChainError::Decode(e.to_string()))?;
        let data = info
            .at("data")
            .ok_or_else(|| ChainError::Decode("System.Account has no 'data' field".to_string()))?;

        let field = |name: &str| -> ChainResult<u128> {
            data.at(name)
                .and_then(|v| v.as_u128())
                .ok_or_else(|| ChainError::Decode(format!("account data has no '{}' field", name)))
        };

        // Newer runtimes merge the two frozen fields into one.
        let (misc_frozen, fee_frozen) = match (field("misc_frozen"), field("fee_frozen")) {
            (Ok(misc), Ok(fee)) => (misc, fee),
            _ => {
                let frozen = field("frozen")?;
                (frozen, frozen)
            }
        };

        Ok(AccountData {
            free: field("free")?,
            reserved: field("reserved")?,
            misc_frozen,
            fee_frozen,
        })
    }

    /// Wait until `count` finalized blocks have been produced after the
    /// current one. Returns the number of the last block seen.
    pub async fn wait_for_elapsed_blocks(&self, count: u32, limit: Duration) -> ChainResult<u64> {
        let blocks = self.subscribe_finalized().await?;
        let mut numbers =
            blocks.map(|block| block.map(|b| u64::from(b.number())).map_err(ChainError::from));

        within(limit, || format!("{} finalized blocks", count), elapsed_blocks(&mut numbers, count)).await
    }

    /// Subscribe to finalized blocks.
    pub async fn subscribe_finalized(
        &self,
    ) -> ChainResult<impl futures_util::Stream<Item = Result<LedgerBlock, subxt::Error>> + Unpin> {
        self.rpc(self.api.blocks().subscribe_finalized()).await
    }

    /// Sign and submit `call`, then wait until it is finalized.
    ///
    /// Pallet errors surface as [`ChainError::Module`], other dispatch
    /// failures as [`ChainError::Dispatch`]. A node that does not finalize
    /// the extrinsic in time yields [`ChainError::WaitTimeout`].
    pub async fn sign_and_submit(
        &self,
        call: &DynamicPayload,
        signer: &Keypair,
    ) -> ChainResult<ExtrinsicEvents<PolkadotConfig>> {
        let progress = self
            .rpc(self.api.tx().sign_and_submit_then_watch_default(call, signer))
            .await?;

        tracing::debug!(
            pallet = call.pallet_name(),
            call = call.call_name(),
            tx_hash = ?progress.extrinsic_hash(),
            "Extrinsic submitted"
        );

        let finalized = async { progress.wait_for_finalized_success().await.map_err(ChainError::from) };
        let events = within(
            self.finalization_timeout,
            || format!("finalization of {}.{}", call.pallet_name(), call.call_name()),
            finalized,
        )
        .await?;

        tracing::debug!(
            block_hash = ?events.block_hash(),
            "Extrinsic finalized"
        );
        Ok(events)
    }
}

/// Run `fut` with a deadline, naming what was awaited if it expires.
pub(crate) async fn within<T, F, W>(limit: Duration, what: W, fut: F) -> ChainResult<T>
where
    F: Future<Output = ChainResult<T>>,
    W: FnOnce() -> String,
{
    match timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(ChainError::WaitTimeout {
            what: what(),
            secs: limit.as_secs(),
        }),
    }
}

/// Consume block numbers until `count` blocks past the first one were seen.
async fn elapsed_blocks<S>(numbers: &mut S, count: u32) -> ChainResult<u64>
where
    S: futures_util::Stream<Item = ChainResult<u64>> + Unpin,
{
    let mut start = None;
    while let Some(number) = numbers.next().await {
        let number = number?;
        let first = *start.get_or_insert(number);
        if number >= first + u64::from(count) {
            return Ok(number);
        }
    }
    Err(ChainError::Rpc("finalized block subscription ended".to_string()))
}

impl std::fmt::Debug for CreditcoinClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditcoinClient")
            .field("url", &self.url)
            .field("timeout_secs", &self.timeout_secs)
            .field("finalization_timeout", &self.finalization_timeout)
            .finish()
    }
}
