use crate::domain::asset::USDC_ASSET_ID;
use crate::domain::outcome::{BalanceSnapshot, TransactionOutcome};
use crate::domain::ports::ChainService;
use crate::domain::tip::{TipRequest, is_valid_address};
use crate::error::{Result, TipError};
use crate::infrastructure::explorer_url;
use crate::infrastructure::rpc::{ChainConnectionBox, ChainConnectorBox, TransferCall, TxStatus};
use crate::infrastructure::signer::WalletKey;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Live ledger backend for Asset Hub.
///
/// Connects lazily on first use and reuses the session for the lifetime of
/// the value. Lazy initialization is guarded by a mutex, so concurrent
/// callers can never double-connect. There is no automatic reconnection:
/// a dropped connection surfaces as a failed send, and only an explicit
/// `disconnect` followed by the next send opens a fresh session.
pub struct AssetHub {
    key: WalletKey,
    endpoint: String,
    connector: ChainConnectorBox,
    connection: Mutex<Option<ChainConnectionBox>>,
}

impl AssetHub {
    /// Build the backend, deriving the signing key up front so a bad seed
    /// fails at startup rather than on the first tip.
    pub fn new(
        wallet_seed: &str,
        endpoint: impl Into<String>,
        connector: ChainConnectorBox,
    ) -> Result<Self> {
        Ok(Self {
            key: WalletKey::from_seed(wallet_seed)?,
            endpoint: endpoint.into(),
            connector,
            connection: Mutex::new(None),
        })
    }

    async fn ensure_connected<'a>(
        &self,
        slot: &'a mut Option<ChainConnectionBox>,
    ) -> Result<&'a ChainConnectionBox> {
        if slot.is_none() {
            info!(endpoint = %self.endpoint, "connecting to Asset Hub");
            *slot = Some(self.connector.connect(&self.endpoint).await?);
        }
        match slot.as_ref() {
            Some(connection) => Ok(connection),
            None => Err(TipError::Connection("connection unavailable".to_string())),
        }
    }

    /// Build the asset-specific transfer call for a validated request,
    /// converting the amount into the smallest unit.
    fn transfer_call(request: &TipRequest) -> Result<TransferCall> {
        let units = request
            .asset
            .to_smallest_unit(request.amount)
            .ok_or_else(|| {
                TipError::Transaction(format!(
                    "amount {} {} does not fit the unit range",
                    request.amount, request.asset
                ))
            })?;
        Ok(match request.asset.asset_id() {
            None => TransferCall::NativeTransferKeepAlive {
                dest: request.recipient.clone(),
                value: units,
            },
            Some(id) => TransferCall::AssetTransferKeepAlive {
                id,
                target: request.recipient.clone(),
                amount: units,
            },
        })
    }

    async fn submit_and_monitor(&self, request: &TipRequest) -> Result<TransactionOutcome> {
        // Funds move past this point, so the recipient address is checked
        // again here regardless of what the parser accepted.
        if !is_valid_address(&request.recipient) {
            return Err(TipError::InvalidAddress(request.recipient.clone()));
        }

        let call = Self::transfer_call(request)?;

        let mut guard = self.connection.lock().await;
        let connection = self.ensure_connected(&mut *guard).await?;

        debug!(?call, "submitting transfer");
        let mut events = connection.submit_transfer(call, &self.key).await?;

        while let Some(status) = events.recv().await {
            match status {
                TxStatus::InBlock { tx_hash } => {
                    debug!(%tx_hash, "transfer included in best block");
                }
                TxStatus::Finalized {
                    tx_hash,
                    block_hash,
                } => {
                    info!(%tx_hash, %block_hash, "transfer finalized");
                    let url = explorer_url(&tx_hash);
                    return Ok(TransactionOutcome::finalized(tx_hash, block_hash, url));
                }
                TxStatus::Error(error) => return Err(TipError::Transaction(error)),
            }
        }

        Err(TipError::Transaction(
            "status stream ended before finality".to_string(),
        ))
    }

    async fn query_balances(&self) -> Result<BalanceSnapshot> {
        let mut guard = self.connection.lock().await;
        let connection = self.ensure_connected(&mut *guard).await?;

        let account = self.key.public_key();
        let native = connection.free_native_balance(account).await?;

        // A failed secondary-asset query degrades to a zero balance; only
        // the native query can fail the snapshot.
        let asset = match connection.asset_balance(USDC_ASSET_ID, account).await {
            Ok(units) => units,
            Err(e) => {
                warn!("could not query USDC balance: {e}");
                0
            }
        };

        Ok(BalanceSnapshot::ok(native, asset))
    }
}

#[async_trait]
impl ChainService for AssetHub {
    async fn send_tip(&self, request: &TipRequest) -> TransactionOutcome {
        info!(
            recipient = %request.recipient,
            amount = %request.amount,
            asset = %request.asset,
            "sending tip on Asset Hub"
        );
        match self.submit_and_monitor(request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("tip transfer failed: {e}");
                TransactionOutcome::failure(format!("blockchain transaction failed: {e}"))
            }
        }
    }

    async fn check_balance(&self) -> BalanceSnapshot {
        match self.query_balances().await {
            Ok(snapshot) => snapshot,
            Err(e) => BalanceSnapshot::failure(format!("failed to check wallet balance: {e}")),
        }
    }

    async fn disconnect(&self) -> Result<()> {
        let mut guard = self.connection.lock().await;
        if let Some(connection) = guard.take() {
            connection.close().await;
            info!("disconnected from Asset Hub");
        }
        Ok(())
    }
}
