use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Asset identifier of USDC on Asset Hub (Assets pallet).
pub const USDC_ASSET_ID: u32 = 1337;

/// The assets the bot can transfer, in display order.
pub const SUPPORTED_ASSETS: [Asset; 2] = [Asset::Dot, Asset::Usdc];

/// An asset supported for tipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Asset {
    Dot,
    Usdc,
}

impl Asset {
    /// Parse a ticker symbol, case-insensitively.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "DOT" => Some(Asset::Dot),
            "USDC" => Some(Asset::Usdc),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Asset::Dot => "DOT",
            Asset::Usdc => "USDC",
        }
    }

    /// Decimal places of the smallest on-chain unit.
    /// 1 DOT = 10^10 planck; 1 USDC = 10^6 units.
    pub fn decimals(&self) -> u32 {
        match self {
            Asset::Dot => 10,
            Asset::Usdc => 6,
        }
    }

    /// Assets-pallet identifier, `None` for the native currency.
    pub fn asset_id(&self) -> Option<u32> {
        match self {
            Asset::Dot => None,
            Asset::Usdc => Some(USDC_ASSET_ID),
        }
    }

    fn scale(&self) -> Decimal {
        Decimal::from(10u64.pow(self.decimals()))
    }

    /// Convert a human-scale amount into the smallest on-chain unit.
    ///
    /// Truncates any fraction below one unit rather than rounding, so the
    /// converted value never exceeds what was requested. Returns `None`
    /// when the amount does not fit the unit range.
    pub fn to_smallest_unit(&self, amount: Decimal) -> Option<u128> {
        amount.checked_mul(self.scale())?.trunc().to_u128()
    }

    /// Convert a smallest-unit amount back to the human scale.
    pub fn from_smallest_unit(&self, units: u128) -> Decimal {
        Decimal::from_u128(units).unwrap_or(Decimal::MAX) / self.scale()
    }

    /// Comma-separated list of supported symbols, for error messages.
    pub fn supported_list() -> String {
        SUPPORTED_ASSETS
            .iter()
            .map(|asset| asset.symbol())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
