use crate::domain::asset::Asset;
use rust_decimal::Decimal;

/// Base58 alphabet used by SS58 addresses (no `0`, `O`, `I`, `l`).
const BASE58_ALPHABET: &[u8; 58] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Lookup table: ASCII byte -> whether it belongs to the base58 alphabet.
const BASE58_VALID: [bool; 128] = {
    let mut table = [false; 128];
    let mut i = 0;
    while i < BASE58_ALPHABET.len() {
        table[BASE58_ALPHABET[i] as usize] = true;
        i += 1;
    }
    table
};

/// Check a recipient address against the Asset Hub SS58 grammar:
/// 47 or 48 base58 characters.
pub fn is_valid_address(address: &str) -> bool {
    let len = address.len();
    if !(47..=48).contains(&len) {
        return false;
    }
    address
        .bytes()
        .all(|b| (b as usize) < BASE58_VALID.len() && BASE58_VALID[b as usize])
}

/// A parsed tip command, validated and ready for submission.
#[derive(Debug, Clone, PartialEq)]
pub struct TipRequest {
    /// Recipient address in SS58 format.
    pub recipient: String,
    /// Human-scale amount, always positive.
    pub amount: Decimal,
    pub asset: Asset,
    /// Free-text note appended after the asset symbol.
    pub note: Option<String>,
    /// The normalized comment text the command was extracted from.
    pub raw_comment: String,
}
