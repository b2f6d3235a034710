use crate::{errors::ConfigError, types::UsdValue};
use std::{env, str::FromStr};

pub const API_KEY_VAR: &str = "DEBANK_KEY";
pub const BASE_URL_VAR: &str = "DEBANK_BASE_URL";
pub const DUST_THRESHOLD_VAR: &str = "DEBANK_DUST_THRESHOLD_USD";
pub const CORE_TOKENS_ONLY_VAR: &str = "DEBANK_CORE_TOKENS_ONLY";

pub const DEFAULT_DUST_THRESHOLD_USD: UsdValue = 1.0;

/// Filtering rules applied while the cache is populated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheRules {
    /// Chain balances at or below this value are treated as dust.
    pub dust_threshold_usd: UsdValue,
    /// Keep only tokens Debank flags as core holdings.
    pub core_tokens_only: bool,
}

impl Default for CacheRules {
    fn default() -> Self {
        Self {
            dust_threshold_usd: DEFAULT_DUST_THRESHOLD_USD,
            core_tokens_only: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub rules: CacheRules,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: providers::debank::BASE_URL.to_string(),
            rules: CacheRules::default(),
        }
    }

    /// Reads the configuration from the process environment. Call
    /// `dotenv::dotenv()` beforehand to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::MissingVar(API_KEY_VAR.into()))?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        if let Some(threshold) = parse_var::<_, UsdValue>(&lookup, DUST_THRESHOLD_VAR)? {
            if !threshold.is_finite() {
                return Err(ConfigError::InvalidVar(
                    DUST_THRESHOLD_VAR.into(),
                    threshold.to_string(),
                ));
            }
            config.rules.dust_threshold_usd = threshold;
        }
        if let Some(core_only) = parse_var(&lookup, CORE_TOKENS_ONLY_VAR)? {
            config.rules.core_tokens_only = core_only;
        }

        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, var: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(var)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| ConfigError::InvalidVar(var.into(), value))
        })
        .transpose()
}
