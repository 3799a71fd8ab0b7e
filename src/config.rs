use crate::domain::policy::TipLimits;
use crate::error::{Result, TipError};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

/// Default public Asset Hub RPC endpoint.
pub const DEFAULT_RPC_ENDPOINT: &str = "wss://polkadot-asset-hub-rpc.polkadot.io";

#[derive(Debug, Clone, PartialEq)]
pub struct GithubConfig {
    pub org: String,
    pub team: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChainConfig {
    pub wallet_seed: String,
    pub rpc_endpoint: String,
    pub limits: TipLimits,
}

/// Process configuration, validated once at startup. The process fails
/// fast on the first violation; nothing here mutates at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    pub github: GithubConfig,
    pub chain: ChainConfig,
}

impl BotConfig {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup. Lets tests
    /// inject values without touching the process environment.
    pub fn from_source<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let wallet_seed = required(&get, "WALLET_SEED")?;
        validate_wallet_seed(&wallet_seed)?;

        Ok(Self {
            github: GithubConfig {
                org: required(&get, "GITHUB_ORG")?,
                team: required(&get, "GITHUB_TEAM")?,
            },
            chain: ChainConfig {
                wallet_seed,
                rpc_endpoint: get("ASSET_HUB_RPC")
                    .unwrap_or_else(|| DEFAULT_RPC_ENDPOINT.to_string()),
                limits: TipLimits {
                    max_dot: required_positive(&get, "MAX_DOT_TIP")?,
                    max_usdc: required_positive(&get, "MAX_USDC_TIP")?,
                },
            },
        })
    }
}

fn required<F>(get: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    get(key).ok_or_else(|| TipError::Config(format!("missing required environment variable: {key}")))
}

fn required_positive<F>(get: &F, key: &str) -> Result<Decimal>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = required(get, key)?;
    let value = Decimal::from_str(&raw)
        .map_err(|_| TipError::Config(format!("{key} must be a positive number, got: {raw}")))?;
    if value <= Decimal::ZERO {
        return Err(TipError::Config(format!(
            "{key} must be a positive number, got: {raw}"
        )));
    }
    Ok(value)
}

/// A seed is either a `0x`-prefixed 32-byte hex string or a 12/24-word
/// mnemonic. Only the shape is checked here; full derivation happens when
/// the signing key is built.
fn validate_wallet_seed(seed: &str) -> Result<()> {
    if let Some(hex_part) = seed.strip_prefix("0x") {
        if hex_part.len() == 64 && hex_part.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Ok(());
        }
        return Err(TipError::Config(
            "WALLET_SEED hex form must be 32 bytes (64 hex characters)".to_string(),
        ));
    }
    let words = seed.split_whitespace().count();
    if words == 12 || words == 24 {
        return Ok(());
    }
    Err(TipError::Config(
        "WALLET_SEED must be a 12 or 24 word mnemonic phrase or a 0x hex seed".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn env_fixture() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("GITHUB_ORG", "fluffylabs"),
            ("GITHUB_TEAM", "core-team"),
            (
                "WALLET_SEED",
                "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
            ),
            ("MAX_DOT_TIP", "100"),
            ("MAX_USDC_TIP", "1000"),
        ])
    }

    fn load(vars: &HashMap<&str, &str>) -> Result<BotConfig> {
        BotConfig::from_source(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_full_config_loads() {
        let config = load(&env_fixture()).unwrap();
        assert_eq!(config.github.org, "fluffylabs");
        assert_eq!(config.chain.limits.max_dot, dec!(100));
        assert_eq!(config.chain.rpc_endpoint, DEFAULT_RPC_ENDPOINT);
    }

    #[test]
    fn test_rpc_endpoint_override() {
        let mut vars = env_fixture();
        vars.insert("ASSET_HUB_RPC", "wss://test-rpc.example.com");
        let config = load(&vars).unwrap();
        assert_eq!(config.chain.rpc_endpoint, "wss://test-rpc.example.com");
    }

    #[test]
    fn test_missing_variable_fails_fast() {
        let mut vars = env_fixture();
        vars.remove("GITHUB_TEAM");
        let err = load(&vars).unwrap_err();
        assert!(err.to_string().contains("GITHUB_TEAM"));
    }

    #[test]
    fn test_non_positive_ceiling_rejected() {
        for bad in ["0", "-5", "lots"] {
            let mut vars = env_fixture();
            vars.insert("MAX_DOT_TIP", bad);
            let err = load(&vars).unwrap_err();
            assert!(err.to_string().contains("MAX_DOT_TIP"), "accepted {bad}");
        }
    }

    #[test]
    fn test_hex_seed_accepted() {
        let mut vars = env_fixture();
        vars.insert(
            "WALLET_SEED",
            "0x0000000000000000000000000000000000000000000000000000000000000001",
        );
        assert!(load(&vars).is_ok());
    }

    #[test]
    fn test_malformed_seed_rejected() {
        for bad in ["0xdeadbeef", "too few words", "0xnothexnothexnothexnothexnothexnothexnothexnothexnothexnothexnot"] {
            let mut vars = env_fixture();
            vars.insert("WALLET_SEED", bad);
            let err = load(&vars).unwrap_err();
            assert!(err.to_string().contains("WALLET_SEED"), "accepted {bad}");
        }
    }

    #[test]
    fn test_24_word_mnemonic_accepted() {
        let words = vec!["abandon"; 23].join(" ") + " art";
        let base = env_fixture();
        let config = BotConfig::from_source(|key| {
            if key == "WALLET_SEED" {
                Some(words.clone())
            } else {
                base.get(key).map(|v| v.to_string())
            }
        });
        assert!(config.is_ok());
    }
}
