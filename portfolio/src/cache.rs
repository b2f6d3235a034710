use crate::types::{ChainId, ChainRecord, TokenRecord, UsdValue};
use std::collections::BTreeMap;

/// Chains and token holdings of a single wallet fetched so far.
///
/// The cache is bound to one wallet address at a time. Chain entries are
/// first-write-wins, token entries last-write-wins.
#[derive(Debug, Default, Clone)]
pub struct WalletCache {
    wallet: Option<String>,
    seeded: bool,
    chains: BTreeMap<ChainId, ChainRecord>,
}

impl WalletCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wallet(&self) -> Option<&str> {
        self.wallet.as_deref()
    }

    /// Binds the cache to `wallet`, dropping everything cached for a
    /// different wallet.
    pub fn bind(&mut self, wallet: &str) {
        match self.wallet.as_deref() {
            Some(bound) if bound == wallet => {}
            Some(bound) => {
                log::warn!("Switching cache from wallet `{bound}` to `{wallet}`, clearing it");
                self.clear();
                self.wallet = Some(wallet.to_string());
            }
            None => self.wallet = Some(wallet.to_string()),
        }
    }

    /// Whether the chain list of `wallet` has been loaded into the cache.
    pub fn is_seeded_for(&self, wallet: &str) -> bool {
        self.seeded && self.wallet() == Some(wallet)
    }

    pub fn mark_seeded(&mut self) {
        self.seeded = true;
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn token_count(&self) -> usize {
        self.chains.values().map(|chain| chain.tokens.len()).sum()
    }

    pub fn chain_ids(&self) -> Vec<ChainId> {
        self.chains.keys().cloned().collect()
    }

    pub fn chains(&self) -> &BTreeMap<ChainId, ChainRecord> {
        &self.chains
    }

    pub fn get(&self, chain_id: &str) -> Option<&ChainRecord> {
        self.chains.get(chain_id)
    }

    /// Inserts `record` unless the chain is already cached. Returns whether
    /// the record was inserted.
    pub fn insert_chain(&mut self, chain_id: ChainId, record: ChainRecord) -> bool {
        use std::collections::btree_map::Entry;

        match self.chains.entry(chain_id) {
            Entry::Vacant(entry) => {
                entry.insert(record);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn set_usd_balance(&mut self, chain_id: &str, usd_balance: Option<UsdValue>) {
        if let Some(chain) = self.chains.get_mut(chain_id) {
            chain.usd_balance = usd_balance;
        }
    }

    /// Stores `token` under its id, replacing any previous record. Tokens of
    /// chains that aren't cached are ignored.
    pub fn upsert_token(&mut self, chain_id: &str, token: TokenRecord) {
        match self.chains.get_mut(chain_id) {
            Some(chain) => {
                chain.tokens.insert(token.token_id.clone(), token);
            }
            None => log::warn!("Dropping token `{}` of uncached chain `{chain_id}`", token.token_id),
        }
    }

    pub fn clear(&mut self) {
        self.wallet = None;
        self.seeded = false;
        self.chains.clear();
    }
}

#[cfg(test)]
mod test {
    use super::WalletCache;
    use crate::types::{ChainRecord, TokenRecord};

    fn token(id: &str, quantity: f64) -> TokenRecord {
        TokenRecord {
            token_name: Some(id.to_uppercase()),
            token_id: id.into(),
            token_quantity: quantity,
            token_price: Some(1.0),
        }
    }

    #[test]
    fn chains_are_first_write_wins() {
        let mut cache = WalletCache::new();

        assert!(cache.insert_chain("eth".into(), ChainRecord::new(Some("Ethereum".into()), 1)));
        assert!(!cache.insert_chain("eth".into(), ChainRecord::new(Some("Renamed".into()), 2)));

        let eth = cache.get("eth").unwrap();
        assert_eq!(eth.chain_name.as_deref(), Some("Ethereum"));
        assert_eq!(eth.chain_community_id, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn tokens_are_last_write_wins() {
        let mut cache = WalletCache::new();
        cache.insert_chain("eth".into(), ChainRecord::new(None, 1));

        cache.upsert_token("eth", token("usdc", 10.0));
        cache.upsert_token("eth", token("usdc", 25.0));
        cache.upsert_token("bsc", token("cake", 5.0));

        assert_eq!(cache.token_count(), 1);
        assert_eq!(cache.get("eth").unwrap().tokens["usdc"].token_quantity, 25.0);
    }

    #[test]
    fn rebinding_to_another_wallet_clears() {
        let mut cache = WalletCache::new();
        cache.bind("0xaaa");
        cache.insert_chain("eth".into(), ChainRecord::new(None, 1));
        cache.mark_seeded();

        cache.bind("0xaaa");
        assert!(cache.is_seeded_for("0xaaa"));
        assert_eq!(cache.len(), 1);

        cache.bind("0xbbb");
        assert!(!cache.is_seeded_for("0xbbb"));
        assert!(cache.is_empty());
        assert_eq!(cache.wallet(), Some("0xbbb"));
    }

    #[test]
    fn clear_is_unconditional() {
        let mut cache = WalletCache::new();
        cache.clear();
        assert!(cache.is_empty());

        cache.bind("0xaaa");
        cache.insert_chain("eth".into(), ChainRecord::new(None, 1));
        cache.upsert_token("eth", token("usdc", 1.0));
        cache.mark_seeded();
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.token_count(), 0);
        assert!(!cache.is_seeded_for("0xaaa"));
        assert_eq!(cache.wallet(), None);
    }
}
