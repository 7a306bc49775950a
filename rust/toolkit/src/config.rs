use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use num_bigint::BigUint;
use num_traits::Zero;
use serde::Deserialize;
use starknet::core::types::Felt;
use tracing::info;
use url::Url;

use crate::error::ToolkitError;
use crate::utils::{parse_amount, parse_felt, split_u256, Address};

pub const CONFIG_ENV: &str = "STARKSWAP_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "starkswap.toml";

#[derive(Debug, Deserialize)]
pub struct RawConfig {
    pub network: String,
    pub rpc_url: String,
    pub artifacts_dir: String,
    pub keys: RawKeys,
    pub addresses: RawAddresses,
    pub tokens: Vec<RawToken>,
    pub pool: RawPoolSeed,
}

#[derive(Debug, Deserialize)]
pub struct RawKeys {
    pub admin_public_key: String,
    pub guardian_public_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawAddresses {
    pub admin_account: String,
    pub guardian: Option<String>,
    pub pool: Option<String>,
    pub router: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawToken {
    pub symbol: String,
    pub decimals: u8,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawPoolSeed {
    pub token0_amount: String,
    pub token1_amount: String,
}

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub symbol: String,
    pub decimals: u8,
    pub address: Option<Address>,
}

#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub network: String,
    pub rpc_url: Url,
    pub artifacts_dir: PathBuf,
    pub admin_public_key: Felt,
    pub guardian_public_key: Option<Felt>,
    pub admin_account: Address,
    pub guardian: Option<Address>,
    pub pool: Option<Address>,
    pub router: Option<Address>,
    pub tokens: Vec<TokenConfig>,
    pub token0_amount: BigUint,
    pub token1_amount: BigUint,
}

/// Config path from the environment, falling back to `starkswap.toml`.
pub fn config_path_from_env() -> PathBuf {
    std::env::var(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

pub fn load_config(path: &Path) -> Result<DeployConfig, ToolkitError> {
    let contents = fs::read_to_string(path)
        .map_err(|err| ToolkitError::Config(format!("failed to read {path:?}: {err}")))?;
    let raw: RawConfig = toml::from_str(&contents)?;
    let config = finalize_config(raw, path)?;
    info!(
        network = %config.network,
        tokens = config.tokens.len(),
        "loaded deployment config"
    );
    Ok(config)
}

pub fn finalize_config(raw: RawConfig, config_path: &Path) -> Result<DeployConfig, ToolkitError> {
    let base_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let artifacts_dir = resolve_path(&base_dir, &raw.artifacts_dir);
    let rpc_url =
        Url::parse(&raw.rpc_url).map_err(|e| ToolkitError::Config(format!("rpc_url: {e}")))?;

    let admin_public_key = config_felt("keys.admin_public_key", &raw.keys.admin_public_key)?;
    let guardian_public_key = optional_felt(
        "keys.guardian_public_key",
        raw.keys.guardian_public_key.as_deref(),
    )?;
    let admin_account = config_felt("addresses.admin_account", &raw.addresses.admin_account)?;
    let guardian = optional_felt("addresses.guardian", raw.addresses.guardian.as_deref())?;
    let pool = optional_felt("addresses.pool", raw.addresses.pool.as_deref())?;
    let router = optional_felt("addresses.router", raw.addresses.router.as_deref())?;

    if admin_public_key == Felt::ZERO {
        return Err(ToolkitError::Config(
            "keys.admin_public_key cannot be zero".to_string(),
        ));
    }
    if admin_account == Felt::ZERO {
        return Err(ToolkitError::Config(
            "addresses.admin_account cannot be zero".to_string(),
        ));
    }
    if raw.network.trim().is_empty() {
        return Err(ToolkitError::Config("network must not be empty".to_string()));
    }

    let tokens = finalize_tokens(raw.tokens)?;

    let token0_amount = parse_amount(&raw.pool.token0_amount)
        .map_err(|e| ToolkitError::Config(format!("pool.token0_amount: {e}")))?;
    let token1_amount = parse_amount(&raw.pool.token1_amount)
        .map_err(|e| ToolkitError::Config(format!("pool.token1_amount: {e}")))?;
    let seeds = [("token0_amount", &token0_amount), ("token1_amount", &token1_amount)];
    for (name, amount) in seeds {
        if amount.is_zero() {
            return Err(ToolkitError::Config(format!("pool.{name} must be >= 1")));
        }
        split_u256(amount).map_err(|e| ToolkitError::Config(format!("pool.{name}: {e}")))?;
    }

    Ok(DeployConfig {
        network: raw.network,
        rpc_url,
        artifacts_dir,
        admin_public_key,
        guardian_public_key,
        admin_account,
        guardian,
        pool,
        router,
        tokens,
        token0_amount,
        token1_amount,
    })
}

fn finalize_tokens(raw: Vec<RawToken>) -> Result<Vec<TokenConfig>, ToolkitError> {
    if raw.len() < 2 {
        return Err(ToolkitError::Config(
            "at least two tokens are required".to_string(),
        ));
    }
    let mut symbols = HashSet::new();
    let mut addresses = HashSet::new();
    let mut tokens = Vec::with_capacity(raw.len());
    for token in raw {
        let symbol = token.symbol;
        if symbol.is_empty() {
            return Err(ToolkitError::Config("token symbol must not be empty".to_string()));
        }
        if symbol.trim() != symbol {
            return Err(ToolkitError::Config(format!(
                "token symbol {symbol:?} has surrounding whitespace"
            )));
        }
        if !symbols.insert(symbol.clone()) {
            return Err(ToolkitError::Config(format!("duplicate token symbol {symbol}")));
        }
        let address = optional_felt(&format!("tokens.{symbol}.address"), token.address.as_deref())?;
        if let Some(address) = address {
            if !addresses.insert(address) {
                return Err(ToolkitError::Config(format!(
                    "token {symbol} reuses an address"
                )));
            }
        }
        tokens.push(TokenConfig {
            symbol,
            decimals: token.decimals,
            address,
        });
    }
    Ok(tokens)
}

fn config_felt(field: &str, value: &str) -> Result<Felt, ToolkitError> {
    parse_felt(value).map_err(|e| ToolkitError::Config(format!("{field}: {e}")))
}

fn optional_felt(field: &str, value: Option<&str>) -> Result<Option<Felt>, ToolkitError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => config_felt(field, value).map(Some),
        _ => Ok(None),
    }
}

fn resolve_path(base: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::{finalize_config, RawConfig};
    use crate::error::ToolkitError;
    use std::path::{Path, PathBuf};

    const BASE: &str = r#"
network = "alpha"
rpc_url = "http://localhost:5050"
artifacts_dir = "artifacts"

[keys]
admin_public_key = "0x60d46f8d7ef3d83ed05f3ed9beb91e22f9529289b9d863683fd71eafaf28035"

[addresses]
admin_account = "0x5705c3c5e03dd01d68077e0b75c5ba8009da7a09c41a69015bcc80b39163c8"

[[tokens]]
symbol = "TKA"
decimals = 18

[[tokens]]
symbol = "TKB"
decimals = 18

[pool]
token0_amount = "1000000000000000000000"
token1_amount = "2000000000000000000000"
"#;

    fn parse(text: &str) -> Result<super::DeployConfig, ToolkitError> {
        let raw: RawConfig = toml::from_str(text)?;
        finalize_config(raw, Path::new("/srv/deploy/starkswap.toml"))
    }

    #[test]
    fn resolves_artifacts_relative_to_config() {
        let config = parse(BASE).expect("config");
        assert_eq!(config.artifacts_dir, PathBuf::from("/srv/deploy/artifacts"));
        assert_eq!(config.tokens.len(), 2);
        assert!(config.guardian.is_none());
        assert!(config.pool.is_none());
    }

    #[test]
    fn rejects_duplicate_symbols() {
        let text = BASE.replace("symbol = \"TKB\"", "symbol = \"TKA\"");
        assert!(matches!(parse(&text), Err(ToolkitError::Config(_))));
    }

    #[test]
    fn rejects_zero_seed_amount() {
        let text = BASE.replace(
            "token0_amount = \"1000000000000000000000\"",
            "token0_amount = \"0\"",
        );
        assert!(matches!(parse(&text), Err(ToolkitError::Config(_))));
    }

    #[test]
    fn rejects_negative_seed_amount() {
        let text = BASE.replace(
            "token1_amount = \"2000000000000000000000\"",
            "token1_amount = \"-2\"",
        );
        assert!(matches!(parse(&text), Err(ToolkitError::Config(_))));
    }

    #[test]
    fn rejects_padded_symbol() {
        let text = BASE.replace("symbol = \"TKA\"", "symbol = \" TKA\"");
        assert!(matches!(parse(&text), Err(ToolkitError::Config(_))));
    }

    #[test]
    fn rejects_bad_url() {
        let text = BASE.replace("http://localhost:5050", "not a url");
        assert!(matches!(parse(&text), Err(ToolkitError::Config(_))));
    }

    #[test]
    fn empty_optional_address_is_unset() {
        let text = BASE.replace("[addresses]\n", "[addresses]\npool = \"\"\n");
        let config = parse(&text).expect("config");
        assert!(config.pool.is_none());
    }
}
