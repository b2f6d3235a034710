pub mod debank;

use async_trait::async_trait;

pub use debank::{
    types::{ChainBalanceResponse, DebankError, TokenResponse, UsedChain},
    DebankProvider,
};

/// Remote source of per-wallet chain, balance and token data.
#[async_trait]
pub trait WalletDataSource {
    type Error;

    async fn used_chain_list(&self, wallet_address: &str) -> Result<Vec<UsedChain>, Self::Error>;

    async fn chain_balance(
        &self,
        wallet_address: &str,
        chain_id: &str,
    ) -> Result<ChainBalanceResponse, Self::Error>;

    async fn token_list(
        &self,
        wallet_address: &str,
        chain_id: &str,
    ) -> Result<Vec<TokenResponse>, Self::Error>;
}
