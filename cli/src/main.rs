#![deny(clippy::all)]
#![deny(clippy::dbg_macro)]

use anyhow::{anyhow, Error};
use crypto_portfolio::{
    table::{self, Row},
    Config, DebankBalances,
};
use env_logger::{Builder, Env};
use log::{error, info};
use std::{io, str::FromStr};
use structopt::StructOpt;

#[derive(Debug, Clone, Copy)]
enum Format {
    Json,
    Csv,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(anyhow!("Unknown output format `{other}`")),
        }
    }
}

#[derive(Debug, StructOpt)]
enum Command {
    /// List the chains the wallet has interacted with
    Chains,
    /// USD balance of every chain holding more than dust
    Balances,
    /// Core token holdings on every chain
    Tokens,
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "crypto-portfolio",
    about = "Chains, balances and tokens of a wallet, fetched from Debank."
)]
struct Opt {
    /// Set logging level
    #[structopt(short, long, default_value = "warn")]
    log: String,

    /// Output format, `json` or `csv`
    #[structopt(short, long, default_value = "json")]
    format: Format,

    /// Wallet address to query
    wallet: String,

    #[structopt(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let opt = Opt::from_args();

    Builder::from_env(Env::default().default_filter_or(&opt.log)).init();

    if let Err(e) = try_main(&opt).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn try_main(opt: &Opt) -> Result<(), Error> {
    let config = Config::from_env()?;
    let mut api = DebankBalances::from_config(&config)?;

    let rules = api.rules();
    info!(
        "Querying {} on {} (dust threshold {} USD, core tokens only: {})",
        opt.wallet, config.base_url, rules.dust_threshold_usd, rules.core_tokens_only
    );

    match opt.command {
        Command::Chains => {
            api.fetch_interacted_chains(&opt.wallet).await?;
            print(opt.format, &table::chain_rows(api.cache()))
        }
        Command::Balances => {
            let balances = api.fetch_chain_balances(&opt.wallet).await?;
            print(opt.format, &api.chain_balance_table(&balances))
        }
        Command::Tokens => {
            api.fetch_token_balances(&opt.wallet).await?;
            print(opt.format, &api.token_balance_table())
        }
    }
}

fn print<R: Row>(format: Format, rows: &[R]) -> Result<(), Error> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(rows)?),
        Format::Csv => table::write_csv(io::stdout().lock(), rows)?,
    }

    Ok(())
}
