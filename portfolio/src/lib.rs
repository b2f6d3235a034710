#![deny(clippy::dbg_macro)]

pub mod balances;
pub mod cache;
pub mod config;
pub mod errors;
pub mod table;
pub mod types;

pub use balances::DebankBalances;
pub use cache::WalletCache;
pub use config::{CacheRules, Config};
pub use errors::{ConfigError, PortfolioError};
