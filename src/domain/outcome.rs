use crate::domain::asset::Asset;
use crate::domain::tip::TipRequest;
use rust_decimal::Decimal;

/// Discriminated result of the full comment-processing pipeline.
///
/// `is_tip_attempt` separates traffic that should be dropped silently from
/// genuine attempts that deserve feedback; `is_authorized` decides which
/// acknowledgment marker (and how much error detail) the requester sees.
#[derive(Debug, Clone, PartialEq)]
pub struct TipProcessingOutcome {
    pub success: bool,
    pub request: Option<TipRequest>,
    pub error_message: Option<String>,
    pub is_tip_attempt: bool,
    pub is_authorized: bool,
}

impl TipProcessingOutcome {
    /// The comment was not addressed to the bot at all.
    pub fn not_an_attempt() -> Self {
        Self {
            success: false,
            request: None,
            error_message: None,
            is_tip_attempt: false,
            is_authorized: false,
        }
    }

    /// A genuine attempt that failed somewhere in the pipeline.
    pub fn failed_attempt(
        request: Option<TipRequest>,
        message: impl Into<String>,
        is_authorized: bool,
    ) -> Self {
        Self {
            success: false,
            request,
            error_message: Some(message.into()),
            is_tip_attempt: true,
            is_authorized,
        }
    }

    /// A fully validated request, ready for submission.
    pub fn accepted(request: TipRequest) -> Self {
        Self {
            success: true,
            request: Some(request),
            error_message: None,
            is_tip_attempt: true,
            is_authorized: true,
        }
    }
}

/// Result of one ledger transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionOutcome {
    pub success: bool,
    pub tx_hash: Option<String>,
    pub block_hash: Option<String>,
    pub explorer_url: Option<String>,
    pub error: Option<String>,
}

impl TransactionOutcome {
    pub fn finalized(tx_hash: String, block_hash: String, explorer_url: String) -> Self {
        Self {
            success: true,
            tx_hash: Some(tx_hash),
            block_hash: Some(block_hash),
            explorer_url: Some(explorer_url),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            tx_hash: None,
            block_hash: None,
            explorer_url: None,
            error: Some(error.into()),
        }
    }
}

/// Wallet balances in each asset's smallest unit.
///
/// Integer units avoid floating-point error; conversion to the human scale
/// happens only at the reporting edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSnapshot {
    /// Native balance in planck.
    pub dot: u128,
    /// USDC balance in USDC units.
    pub usdc: u128,
    pub success: bool,
    pub error: Option<String>,
}

impl BalanceSnapshot {
    pub fn ok(dot: u128, usdc: u128) -> Self {
        Self {
            dot,
            usdc,
            success: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            dot: 0,
            usdc: 0,
            success: false,
            error: Some(error.into()),
        }
    }
}

/// A low-wallet-balance condition for one asset.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceWarning {
    pub asset: Asset,
    /// Current balance at the human scale.
    pub current_balance: Decimal,
    /// Replenishment threshold (ten tips' worth).
    pub threshold: Decimal,
    pub max_tip: Decimal,
}
