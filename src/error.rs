use crate::domain::asset::Asset;
use crate::interfaces::comment::ParseError;
use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TipError>;

#[derive(Error, Debug)]
pub enum TipError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("code host API error: {0}")]
    Host(String),
    #[error("invalid recipient address: {0}")]
    InvalidAddress(String),
    #[error("invalid wallet seed: {0}")]
    Seed(String),
    #[error("failed to connect to Asset Hub: {0}")]
    Connection(String),
    #[error("transaction failed: {0}")]
    Transaction(String),
    #[error("tip amount {requested} {asset} exceeds maximum of {max} {asset}")]
    LimitExceeded {
        requested: Decimal,
        max: Decimal,
        asset: Asset,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
}
