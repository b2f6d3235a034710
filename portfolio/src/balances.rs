use crate::{
    cache::WalletCache,
    config::{CacheRules, Config},
    errors::PortfolioError,
    table::{self, ChainBalanceRow, TokenBalanceRow},
    types::{ChainBalance, ChainBalances, ChainId, ChainRecord, TokenBalances},
};
use providers::{DebankError, DebankProvider, WalletDataSource};
use std::time::Instant;

/// Debank client caching the chains and token holdings of one wallet.
///
/// Every retrieval operation issues its requests one chain at a time. A
/// failed request aborts the operation, but whatever earlier chains wrote
/// into the cache stays there.
pub struct DebankBalances<S = DebankProvider> {
    source: S,
    rules: CacheRules,
    cache: WalletCache,
}

impl DebankBalances<DebankProvider> {
    pub fn from_config(config: &Config) -> Result<Self, PortfolioError> {
        let provider = DebankProvider::new(&config.base_url, &config.api_key)?;

        Ok(Self::new(provider, config.rules))
    }
}

impl<S> DebankBalances<S>
where
    S: WalletDataSource<Error = DebankError> + Sync,
{
    pub fn new(source: S, rules: CacheRules) -> Self {
        Self {
            source,
            rules,
            cache: WalletCache::new(),
        }
    }

    pub fn cache(&self) -> &WalletCache {
        &self.cache
    }

    pub fn rules(&self) -> &CacheRules {
        &self.rules
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Fetches the chains `wallet_address` has interacted with and caches
    /// every chain that has both an id and a community id. Chains already in
    /// the cache are left untouched. On failure the cache is not modified.
    pub async fn fetch_interacted_chains(
        &mut self,
        wallet_address: &str,
    ) -> Result<Vec<ChainId>, PortfolioError> {
        let started = Instant::now();

        let chains = self
            .source
            .used_chain_list(wallet_address)
            .await
            .map_err(|source| {
                log::error!("Error fetching interacted chains for {wallet_address}: {source}");
                PortfolioError::SourceUnavailable {
                    wallet: wallet_address.to_string(),
                    chain: None,
                    source,
                }
            })?;

        self.cache.bind(wallet_address);

        let mut inserted = 0;
        for chain in chains {
            let (chain_id, community_id) = match (&chain.id, chain.community_id) {
                (Some(id), Some(community_id)) if chain.is_complete() => (id.clone(), community_id),
                _ => {
                    log::debug!("Skipping chain without id or community id: {chain:?}");
                    continue;
                }
            };

            if self
                .cache
                .insert_chain(chain_id, ChainRecord::new(chain.name, community_id))
            {
                inserted += 1;
            }
        }

        self.cache.mark_seeded();

        log::info!(
            "{wallet_address} interacted with {} chains ({inserted} new)",
            self.cache.len()
        );
        log::debug!(
            "fetch_interacted_chains executed in {:.2?}",
            started.elapsed()
        );

        Ok(self.cache.chain_ids())
    }

    /// Loads the chain list unless the cache was already seeded for
    /// `wallet_address`.
    pub async fn ensure_chains_loaded(&mut self, wallet_address: &str) -> Result<(), PortfolioError> {
        if !self.cache.is_seeded_for(wallet_address) {
            self.fetch_interacted_chains(wallet_address).await?;
        }

        Ok(())
    }

    /// USD balance of every cached chain worth more than the dust threshold.
    pub async fn fetch_chain_balances(
        &mut self,
        wallet_address: &str,
    ) -> Result<ChainBalances, PortfolioError> {
        let started = Instant::now();

        self.ensure_chains_loaded(wallet_address).await?;

        let mut balances = ChainBalances::new();

        for chain_id in self.cache.chain_ids() {
            let response = self
                .source
                .chain_balance(wallet_address, &chain_id)
                .await
                .map_err(|source| {
                    log::error!("Error extracting chain balances for {chain_id}: {source}");
                    PortfolioError::SourceUnavailable {
                        wallet: wallet_address.to_string(),
                        chain: Some(chain_id.clone()),
                        source,
                    }
                })?;

            let usd_value = response.usd_value.unwrap_or_default();

            if usd_value > self.rules.dust_threshold_usd {
                self.cache.set_usd_balance(&chain_id, Some(usd_value));
                balances.insert(
                    chain_id,
                    ChainBalance {
                        usd_balance: usd_value,
                    },
                );
            } else {
                self.cache.set_usd_balance(&chain_id, None);
            }
        }

        log::debug!("fetch_chain_balances executed in {:.2?}", started.elapsed());

        Ok(balances)
    }

    /// Token holdings of every cached chain, refreshed from the source.
    pub async fn fetch_token_balances(
        &mut self,
        wallet_address: &str,
    ) -> Result<TokenBalances, PortfolioError> {
        let started = Instant::now();

        self.ensure_chains_loaded(wallet_address).await?;

        let core_tokens_only = self.rules.core_tokens_only;

        for chain_id in self.cache.chain_ids() {
            log::debug!("Fetching tokens for chain {chain_id}");

            let tokens = self
                .source
                .token_list(wallet_address, &chain_id)
                .await
                .map_err(|source| {
                    log::error!("Error fetching tokens for chain {chain_id}: {source}");
                    PortfolioError::SourceUnavailable {
                        wallet: wallet_address.to_string(),
                        chain: Some(chain_id.clone()),
                        source,
                    }
                })?;

            for token in tokens
                .into_iter()
                .filter(|token| token.is_core || !core_tokens_only)
            {
                self.cache.upsert_token(&chain_id, token.into());
            }
        }

        log::debug!("fetch_token_balances executed in {:.2?}", started.elapsed());

        Ok(self.token_balances())
    }

    /// Token maps currently held in the cache, keyed by chain.
    pub fn token_balances(&self) -> TokenBalances {
        self.cache
            .chains()
            .iter()
            .map(|(chain_id, chain)| (chain_id.clone(), chain.tokens.clone()))
            .collect()
    }

    pub fn chain_balance_table(&self, balances: &ChainBalances) -> Vec<ChainBalanceRow> {
        table::chain_balance_rows(balances)
    }

    pub fn token_balance_table(&self) -> Vec<TokenBalanceRow> {
        table::token_balance_rows(&self.cache)
    }
}
