use crate::error::{Result, TipError};
use bip39::Mnemonic;
use ed25519_dalek::{Signer, SigningKey};

/// Signing key for the tipping wallet, derived deterministically from the
/// configured seed.
pub struct WalletKey {
    signing_key: SigningKey,
}

impl WalletKey {
    /// Derive the wallet key from either a `0x`-prefixed 32-byte hex seed
    /// or a BIP39 mnemonic phrase. Both forms yield the same key on every
    /// call for the same input.
    pub fn from_seed(seed: &str) -> Result<Self> {
        let bytes = seed_bytes(seed)?;
        Ok(Self {
            signing_key: SigningKey::from_bytes(&bytes),
        })
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    pub fn sign(&self, payload: &[u8]) -> [u8; 64] {
        self.signing_key.sign(payload).to_bytes()
    }
}

/// Resolve the configured seed into a fixed 32-byte secret.
fn seed_bytes(seed: &str) -> Result<[u8; 32]> {
    if let Some(hex_part) = seed.strip_prefix("0x") {
        if hex_part.len() != 64 {
            return Err(TipError::Seed(
                "hex seed must be 32 bytes (64 hex characters)".to_string(),
            ));
        }
        let decoded =
            hex::decode(hex_part).map_err(|e| TipError::Seed(format!("invalid hex seed: {e}")))?;
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&decoded);
        return Ok(bytes);
    }

    // Mnemonic form: BIP39 seed with an empty passphrase, first 32 bytes
    // as the mini secret.
    let mnemonic = Mnemonic::parse_normalized(seed)
        .map_err(|e| TipError::Seed(format!("invalid mnemonic: {e}")))?;
    let full = mnemonic.to_seed_normalized("");
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&full[..32]);
    Ok(bytes)
}
