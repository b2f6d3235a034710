use serde::Deserialize;
use serde_aux::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DebankError {
    #[error("Debank is unreachable: {0}")]
    Unavailable(String),
    #[error("Invalid Debank request")]
    InvalidRequest,
    #[error("Debank rejected the access key")]
    Unauthorized,
    #[error("Access key is not a valid header value")]
    InvalidAccessKey,
    #[error("Too many requests to Debank")]
    TooManyRequests,
    #[error("Unknown Debank status code `{0}`")]
    Unknown(u16),
    #[error("{0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// One entry of `/v1/user/used_chain_list`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct UsedChain {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub community_id: Option<u64>,
}

impl UsedChain {
    /// Debank occasionally lists chains without an id or community id,
    /// those can't be queried further.
    pub fn is_complete(&self) -> bool {
        matches!(&self.id, Some(id) if !id.is_empty())
            && matches!(self.community_id, Some(community_id) if community_id != 0)
    }
}

/// Body of `/v1/user/chain_balance`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChainBalanceResponse {
    #[serde(default)]
    pub usd_value: Option<f64>,
}

/// One entry of `/v1/user/token_list`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct TokenResponse {
    pub id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub is_core: bool,
}
