pub mod asset_hub;
pub mod rpc;
pub mod signer;
pub mod simulated;

/// Public explorer page for a finalized extrinsic.
pub fn explorer_url(tx_hash: &str) -> String {
    format!("https://assethub-polkadot.subscan.io/extrinsic/{tx_hash}")
}
