use crate::domain::outcome::{BalanceSnapshot, TransactionOutcome};
use crate::domain::ports::ChainService;
use crate::domain::tip::{TipRequest, is_valid_address};
use crate::error::Result;
use crate::infrastructure::explorer_url;
use async_trait::async_trait;
use rand::RngCore;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// Artificial broadcast delay so the simulated path exercises the same
/// await points as the live one.
const SIMULATED_DELAY: Duration = Duration::from_millis(100);

/// Ledger backend that performs the same validation and unit conversion
/// as the live path but never touches the network. Transfers resolve to
/// synthetic identifiers after a bounded delay, so the rest of the
/// pipeline runs without any network dependency.
pub struct SimulatedAssetHub {
    dot_balance: u128,
    usdc_balance: u128,
}

impl SimulatedAssetHub {
    /// Backend with comfortable default balances: 1000 DOT, 10 000 USDC.
    pub fn new() -> Self {
        Self {
            dot_balance: 10_000_000_000_000,
            usdc_balance: 10_000_000_000,
        }
    }

    /// Fix the balances reported by `check_balance`, in smallest units.
    pub fn with_balances(dot_planck: u128, usdc_units: u128) -> Self {
        Self {
            dot_balance: dot_planck,
            usdc_balance: usdc_units,
        }
    }
}

impl Default for SimulatedAssetHub {
    fn default() -> Self {
        Self::new()
    }
}

fn random_hash() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("0x{}", hex::encode(bytes))
}

#[async_trait]
impl ChainService for SimulatedAssetHub {
    async fn send_tip(&self, request: &TipRequest) -> TransactionOutcome {
        if !is_valid_address(&request.recipient) {
            return TransactionOutcome::failure(format!(
                "invalid recipient address: {}",
                request.recipient
            ));
        }
        let Some(units) = request.asset.to_smallest_unit(request.amount) else {
            return TransactionOutcome::failure(format!(
                "amount {} {} does not fit the unit range",
                request.amount, request.asset
            ));
        };

        info!(
            recipient = %request.recipient,
            units,
            asset = %request.asset,
            "simulated transfer"
        );
        sleep(SIMULATED_DELAY).await;

        let tx_hash = random_hash();
        let block_hash = random_hash();
        let url = explorer_url(&tx_hash);
        TransactionOutcome::finalized(tx_hash, block_hash, url)
    }

    async fn check_balance(&self) -> BalanceSnapshot {
        BalanceSnapshot::ok(self.dot_balance, self.usdc_balance)
    }

    async fn disconnect(&self) -> Result<()> {
        Ok(())
    }
}
