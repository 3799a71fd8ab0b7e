use crate::domain::asset::{Asset, SUPPORTED_ASSETS};
use crate::domain::outcome::{BalanceSnapshot, BalanceWarning};
use crate::error::{Result, TipError};
use rust_decimal::Decimal;

/// Per-asset tip ceilings. Configured once at startup, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct TipLimits {
    pub max_dot: Decimal,
    pub max_usdc: Decimal,
}

impl TipLimits {
    pub fn ceiling(&self, asset: Asset) -> Decimal {
        match asset {
            Asset::Dot => self.max_dot,
            Asset::Usdc => self.max_usdc,
        }
    }
}

/// Reject amounts above the configured ceiling for the asset.
pub fn check_limit(limits: &TipLimits, asset: Asset, amount: Decimal) -> Result<()> {
    let max = limits.ceiling(asset);
    if amount > max {
        return Err(TipError::LimitExceeded {
            requested: amount,
            max,
            asset,
        });
    }
    Ok(())
}

/// Flag assets whose wallet balance has fallen below the replenishment
/// threshold of exactly ten times the per-tip ceiling. A balance equal to
/// the threshold does not warn. A failed snapshot produces no warnings.
pub fn balance_warnings(snapshot: &BalanceSnapshot, limits: &TipLimits) -> Vec<BalanceWarning> {
    let mut warnings = Vec::new();
    if !snapshot.success {
        return warnings;
    }

    for asset in SUPPORTED_ASSETS {
        let units = match asset {
            Asset::Dot => snapshot.dot,
            Asset::Usdc => snapshot.usdc,
        };
        let max_tip = limits.ceiling(asset);
        let threshold = max_tip * Decimal::from(10);
        let current_balance = asset.from_smallest_unit(units);
        if current_balance < threshold {
            warnings.push(BalanceWarning {
                asset,
                current_balance,
                threshold,
                max_tip,
            });
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn limits() -> TipLimits {
        TipLimits {
            max_dot: dec!(10),
            max_usdc: dec!(100),
        }
    }

    #[test]
    fn test_amount_within_limit_accepted() {
        assert!(check_limit(&limits(), Asset::Dot, dec!(10)).is_ok());
        assert!(check_limit(&limits(), Asset::Usdc, dec!(0.5)).is_ok());
    }

    #[test]
    fn test_amount_over_limit_rejected_with_both_values() {
        let err = check_limit(&limits(), Asset::Dot, dec!(15)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("15"));
        assert!(message.contains("exceeds maximum of 10"));
    }

    #[test]
    fn test_limits_are_per_asset() {
        // 15 is over the DOT ceiling but well under the USDC one.
        assert!(check_limit(&limits(), Asset::Usdc, dec!(15)).is_ok());
    }

    #[test]
    fn test_low_balance_warns_per_asset() {
        // DOT threshold is 100; 50 DOT in planck is below it. USDC
        // threshold is 1000; 5000 USDC is comfortably above.
        let snapshot = BalanceSnapshot::ok(500_000_000_000, 5_000_000_000);
        let warnings = balance_warnings(&snapshot, &limits());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].asset, Asset::Dot);
        assert_eq!(warnings[0].current_balance, dec!(50));
        assert_eq!(warnings[0].threshold, dec!(100));
        assert_eq!(warnings[0].max_tip, dec!(10));
    }

    #[test]
    fn test_balance_at_threshold_does_not_warn() {
        // Exactly 100 DOT and 1000 USDC: equality never warns.
        let snapshot = BalanceSnapshot::ok(1_000_000_000_000, 1_000_000_000);
        assert!(balance_warnings(&snapshot, &limits()).is_empty());
    }

    #[test]
    fn test_one_unit_below_threshold_warns() {
        let snapshot = BalanceSnapshot::ok(999_999_999_999, 999_999_999);
        let warnings = balance_warnings(&snapshot, &limits());
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].asset, Asset::Dot);
        assert_eq!(warnings[1].asset, Asset::Usdc);
    }

    #[test]
    fn test_failed_snapshot_never_warns() {
        let snapshot = BalanceSnapshot::failure("rpc unreachable");
        assert!(balance_warnings(&snapshot, &limits()).is_empty());
    }
}
