use serde::Serialize;
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;

pub type ChainId = String;
pub type TokenId = String;
pub type CommunityId = u64;
pub type UsdValue = f64;

#[skip_serializing_none]
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChainRecord {
    pub chain_name: Option<String>,
    pub chain_community_id: CommunityId,
    pub usd_balance: Option<UsdValue>,
    pub tokens: BTreeMap<TokenId, TokenRecord>,
}

impl ChainRecord {
    pub fn new(chain_name: Option<String>, chain_community_id: CommunityId) -> Self {
        Self {
            chain_name,
            chain_community_id,
            usd_balance: None,
            tokens: BTreeMap::new(),
        }
    }
}

#[skip_serializing_none]
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TokenRecord {
    pub token_name: Option<String>,
    pub token_id: TokenId,
    pub token_quantity: f64,
    pub token_price: Option<UsdValue>,
}

impl TokenRecord {
    /// Quantity times price, absent when the token has no price.
    pub fn usd_balance(&self) -> Option<UsdValue> {
        self.token_price.map(|price| self.token_quantity * price)
    }
}

impl From<providers::TokenResponse> for TokenRecord {
    fn from(token: providers::TokenResponse) -> Self {
        Self {
            token_name: token.name,
            token_id: token.id,
            token_quantity: token.amount,
            token_price: token.price,
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ChainBalance {
    pub usd_balance: UsdValue,
}

pub type ChainBalances = BTreeMap<ChainId, ChainBalance>;
pub type TokenBalances = BTreeMap<ChainId, BTreeMap<TokenId, TokenRecord>>;

#[cfg(test)]
mod test {
    use super::{ChainRecord, TokenRecord};

    fn token(quantity: f64, price: Option<f64>) -> TokenRecord {
        TokenRecord {
            token_name: Some("ETH".into()),
            token_id: "eth".into(),
            token_quantity: quantity,
            token_price: price,
        }
    }

    #[test]
    fn usd_balance_is_quantity_times_price() {
        assert_eq!(token(1.5, Some(2000.0)).usd_balance(), Some(3000.0));
        assert_eq!(token(0.0, Some(2000.0)).usd_balance(), Some(0.0));
    }

    #[test]
    fn missing_price_has_no_usd_balance() {
        assert_eq!(token(1.5, None).usd_balance(), None);
    }

    #[test]
    fn unset_fields_are_not_serialized() {
        let mut chain = ChainRecord::new(None, 56);
        chain
            .tokens
            .insert("cake".into(), token(2.0, None));

        assert_eq!(
            serde_json::to_value(&chain).unwrap(),
            serde_json::json!({
                "chain_community_id": 56,
                "tokens": {
                    "cake": {
                        "token_name": "ETH",
                        "token_id": "eth",
                        "token_quantity": 2.0
                    }
                }
            })
        );
    }
}
