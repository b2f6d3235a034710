pub mod types;

use crate::{
    debank::types::{ChainBalanceResponse, DebankError, TokenResponse, UsedChain},
    WalletDataSource,
};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    StatusCode,
};
use serde::de::DeserializeOwned;

// Debank
pub const BASE_URL: &str = "https://pro-openapi.debank.com";
const USED_CHAIN_LIST: &str = "v1/user/used_chain_list";
const CHAIN_BALANCE: &str = "v1/user/chain_balance";
const TOKEN_LIST: &str = "v1/user/token_list";
const ACCESS_KEY: &str = "accesskey";

pub struct DebankProvider {
    client: reqwest::Client,
    base_url: String,
}

impl DebankProvider {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, DebankError> {
        let mut headers = HeaderMap::new();

        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            ACCESS_KEY,
            HeaderValue::from_str(api_key).map_err(|_| DebankError::InvalidAccessKey)?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn get<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, DebankError> {
        let url = self.endpoint(path);

        log::debug!("GET {url} {query:?}");

        let res = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    DebankError::Unavailable(e.to_string())
                } else {
                    DebankError::RequestFailed(e)
                }
            })?;

        let status = res.status();

        match status {
            StatusCode::OK => Ok(res.json::<T>().await?),
            StatusCode::BAD_REQUEST => Err(DebankError::InvalidRequest),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(DebankError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => Err(DebankError::TooManyRequests),
            _ => Err(DebankError::Unknown(status.as_u16())),
        }
    }
}

#[async_trait]
impl WalletDataSource for DebankProvider {
    type Error = DebankError;

    async fn used_chain_list(&self, wallet_address: &str) -> Result<Vec<UsedChain>, Self::Error> {
        self.get(USED_CHAIN_LIST, &[("id", wallet_address)]).await
    }

    async fn chain_balance(
        &self,
        wallet_address: &str,
        chain_id: &str,
    ) -> Result<ChainBalanceResponse, Self::Error> {
        self.get(CHAIN_BALANCE, &[("id", wallet_address), ("chain_id", chain_id)])
            .await
    }

    async fn token_list(
        &self,
        wallet_address: &str,
        chain_id: &str,
    ) -> Result<Vec<TokenResponse>, Self::Error> {
        self.get(TOKEN_LIST, &[("id", wallet_address), ("chain_id", chain_id)])
            .await
    }
}

#[cfg(test)]
mod test {
    use crate::{
        debank::{types::DebankError, DebankProvider, BASE_URL},
        WalletDataSource,
    };

    #[test]
    fn endpoint_joins_base_url() {
        let provider = DebankProvider::new("https://pro-openapi.debank.com/", "key").unwrap();

        assert_eq!(
            provider.endpoint("v1/user/token_list"),
            "https://pro-openapi.debank.com/v1/user/token_list"
        );
    }

    #[test]
    fn invalid_access_key_is_rejected() {
        assert!(matches!(
            DebankProvider::new(BASE_URL, "bad\nkey"),
            Err(DebankError::InvalidAccessKey)
        ));
    }

    #[tokio::test]
    #[ignore = "needs DEBANK_KEY and network access"]
    async fn debank_used_chain_list() {
        dotenv::dotenv().ok();

        let key = std::env::var("DEBANK_KEY").unwrap();
        let provider = DebankProvider::new(BASE_URL, &key).unwrap();

        assert!(provider
            .used_chain_list("0xbb140caad2a312dcb2d1eaec02bb11b35816d39d")
            .await
            .is_ok());
    }
}
