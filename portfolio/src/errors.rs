use crate::types::ChainId;
use providers::DebankError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable `{0}` not found")]
    MissingVar(String),
    #[error("Environment variable `{0}` has invalid value `{1}`")]
    InvalidVar(String, String),
}

#[derive(Error, Debug)]
pub enum PortfolioError {
    /// `chain` is `None` when the chain list itself could not be fetched.
    #[error("Failed to fetch {} for `{wallet}`: {source}", describe(.chain))]
    SourceUnavailable {
        wallet: String,
        chain: Option<ChainId>,
        #[source]
        source: DebankError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Provider(#[from] DebankError),
}

impl PortfolioError {
    pub fn chain(&self) -> Option<&str> {
        match self {
            Self::SourceUnavailable { chain, .. } => chain.as_deref(),
            _ => None,
        }
    }
}

fn describe(chain: &Option<ChainId>) -> String {
    match chain {
        Some(chain) => format!("data of chain `{chain}`"),
        None => "interacted chains".into(),
    }
}

#[cfg(test)]
mod test {
    use super::PortfolioError;
    use providers::DebankError;

    #[test]
    fn source_unavailable_message() {
        let chain_list = PortfolioError::SourceUnavailable {
            wallet: "0xabc".into(),
            chain: None,
            source: DebankError::TooManyRequests,
        };
        let chain = PortfolioError::SourceUnavailable {
            wallet: "0xabc".into(),
            chain: Some("eth".into()),
            source: DebankError::Unavailable("connection refused".into()),
        };

        assert_eq!(
            chain_list.to_string(),
            "Failed to fetch interacted chains for `0xabc`: Too many requests to Debank"
        );
        assert_eq!(
            chain.to_string(),
            "Failed to fetch data of chain `eth` for `0xabc`: Debank is unreachable: connection refused"
        );
        assert_eq!(chain.chain(), Some("eth"));
    }
}
