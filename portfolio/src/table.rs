use crate::{
    cache::WalletCache,
    types::{ChainBalances, ChainId, CommunityId, TokenId, UsdValue},
};
use serde::Serialize;
use std::io::Write;

/// A flat row with a fixed set of columns.
pub trait Row: Serialize {
    const COLUMNS: &'static [&'static str];
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChainRow {
    pub chain_id: ChainId,
    pub chain_name: Option<String>,
    pub chain_community_id: CommunityId,
}

impl Row for ChainRow {
    const COLUMNS: &'static [&'static str] = &["chain_id", "chain_name", "chain_community_id"];
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChainBalanceRow {
    pub chain_id: ChainId,
    pub usd_balance: UsdValue,
}

impl Row for ChainBalanceRow {
    const COLUMNS: &'static [&'static str] = &["chain_id", "usd_balance"];
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TokenBalanceRow {
    pub chain_id: ChainId,
    pub chain_name: Option<String>,
    pub chain_community_id: CommunityId,
    pub token_name: Option<String>,
    pub token_id: TokenId,
    pub token_quantity: f64,
    pub token_price: Option<UsdValue>,
    pub usd_balance: Option<UsdValue>,
}

impl Row for TokenBalanceRow {
    const COLUMNS: &'static [&'static str] = &[
        "chain_id",
        "chain_name",
        "chain_community_id",
        "token_name",
        "token_id",
        "token_quantity",
        "token_price",
        "usd_balance",
    ];
}

pub fn chain_rows(cache: &WalletCache) -> Vec<ChainRow> {
    cache
        .chains()
        .iter()
        .map(|(chain_id, chain)| ChainRow {
            chain_id: chain_id.clone(),
            chain_name: chain.chain_name.clone(),
            chain_community_id: chain.chain_community_id,
        })
        .collect()
}

pub fn chain_balance_rows(balances: &ChainBalances) -> Vec<ChainBalanceRow> {
    balances
        .iter()
        .map(|(chain_id, balance)| ChainBalanceRow {
            chain_id: chain_id.clone(),
            usd_balance: balance.usd_balance,
        })
        .collect()
}

/// One row per cached chain/token pair.
pub fn token_balance_rows(cache: &WalletCache) -> Vec<TokenBalanceRow> {
    cache
        .chains()
        .iter()
        .flat_map(|(chain_id, chain)| {
            chain.tokens.values().map(move |token| TokenBalanceRow {
                chain_id: chain_id.clone(),
                chain_name: chain.chain_name.clone(),
                chain_community_id: chain.chain_community_id,
                token_name: token.token_name.clone(),
                token_id: token.token_id.clone(),
                token_quantity: token.token_quantity,
                token_price: token.token_price,
                usd_balance: token.usd_balance(),
            })
        })
        .collect()
}

/// Writes `rows` as CSV. The header is written even when there are no rows.
pub fn write_csv<W: Write, R: Row>(writer: W, rows: &[R]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(R::COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    Ok(())
}
