use crate::domain::asset::Asset;
use crate::error::Result;
use crate::infrastructure::signer::WalletKey;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// A transfer instruction for Asset Hub. Keep-alive variants only, so a
/// tip can never reap the sending account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferCall {
    /// Balances-pallet transfer of the native currency, in planck.
    NativeTransferKeepAlive { dest: String, value: u128 },
    /// Assets-pallet transfer keyed by asset identifier.
    AssetTransferKeepAlive {
        id: u32,
        target: String,
        amount: u128,
    },
}

/// Status events observed while a submitted transfer progresses on chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxStatus {
    /// Included in a candidate (best) block; not yet irreversible.
    InBlock { tx_hash: String },
    /// Irreversibly committed.
    Finalized { tx_hash: String, block_hash: String },
    Error(String),
}

/// An established session with the ledger network. Implementations own
/// the wire protocol; this crate only drives the capability.
#[async_trait]
pub trait ChainConnection: Send + Sync {
    /// Sign and broadcast a transfer, returning the stream of status
    /// events. The caller treats a channel that closes without a terminal
    /// event as a failure.
    async fn submit_transfer(
        &self,
        call: TransferCall,
        key: &WalletKey,
    ) -> Result<mpsc::Receiver<TxStatus>>;

    /// Free balance of the native currency for an account, in planck.
    async fn free_native_balance(&self, account: [u8; 32]) -> Result<u128>;

    /// Balance of an Assets-pallet asset for an account, in asset units.
    /// A missing asset account reads as zero.
    async fn asset_balance(&self, id: u32, account: [u8; 32]) -> Result<u128>;

    async fn close(&self);
}

/// Connection factory for the ledger network.
#[async_trait]
pub trait ChainConnector: Send + Sync {
    async fn connect(&self, endpoint: &str) -> Result<ChainConnectionBox>;
}

pub type ChainConnectionBox = Box<dyn ChainConnection>;
pub type ChainConnectorBox = Box<dyn ChainConnector>;

/// Best-effort fee estimate in the asset's smallest unit. Constant
/// fallback values; estimation never blocks a send.
pub fn estimate_transfer_fee(asset: Asset) -> u128 {
    match asset {
        Asset::Dot => 1_000_000_000, // ~0.1 DOT
        Asset::Usdc => 100_000,      // 0.1 USDC
    }
}
