use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use starknet::core::types::Felt;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use starkswap_toolkit::{
    account_constructor, build_plan, check_artifacts, compute_amount_in, compute_amount_out,
    compute_initial_liquidity, config_path_from_env, decode_symbol, encode_symbol,
    encode_symbol_felt, erc20_constructor, felt_to_hex, guardian_constructor, load_config,
    parse_amount, parse_felt, pool_constructor, router_constructor, ContractArtifact,
};

#[derive(Parser)]
#[command(name = "starkswap-cli")]
#[command(about = "starkswap pricing, symbol and calldata tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    QuoteOut {
        #[arg(long)]
        amount_in: String,
        #[command(flatten)]
        reserves: ReserveArgs,
    },
    QuoteIn {
        #[arg(long)]
        amount_out: String,
        #[command(flatten)]
        reserves: ReserveArgs,
    },
    InitialLiquidity {
        #[arg(long)]
        amount0: String,
        #[arg(long)]
        amount1: String,
    },
    EncodeSymbol {
        #[arg(long)]
        symbol: String,
    },
    DecodeSymbol {
        #[arg(long)]
        encoded: String,
    },
    Calldata {
        #[command(subcommand)]
        contract: ConstructorCommand,
    },
    Artifact {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, num_args = 0.., value_delimiter = ',')]
        check_calldata: Vec<String>,
    },
    Plan {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        check_artifacts: bool,
    },
}

#[derive(Subcommand)]
enum ConstructorCommand {
    Guardian {
        #[arg(long)]
        signer: String,
    },
    Account {
        #[arg(long)]
        signer: String,
        #[arg(long)]
        guardian: Option<String>,
    },
    Erc20 {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        symbol: String,
        #[arg(long, default_value_t = 18)]
        decimals: u8,
    },
    Pool {
        #[arg(long)]
        token0: String,
        #[arg(long)]
        token1: String,
    },
    Router {
        #[arg(long)]
        owner: String,
    },
}

#[derive(Args, Clone)]
struct ReserveArgs {
    #[arg(long)]
    reserve_in: String,
    #[arg(long)]
    reserve_out: String,
}

#[derive(Debug, Serialize)]
struct QuoteOutput {
    amount_in: String,
    amount_out: String,
    reserve_in: String,
    reserve_out: String,
}

#[derive(Debug, Serialize)]
struct SymbolOutput {
    symbol: String,
    encoded: String,
    felt: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command {
        Commands::QuoteOut { amount_in, reserves } => {
            let amount = parse_amount(&amount_in)?;
            let reserve_in = parse_amount(&reserves.reserve_in)?;
            let reserve_out = parse_amount(&reserves.reserve_out)?;
            let amount_out = compute_amount_out(&amount, &reserve_in, &reserve_out)?;
            print_json(&QuoteOutput {
                amount_in: amount.to_str_radix(10),
                amount_out: amount_out.to_str_radix(10),
                reserve_in: reserve_in.to_str_radix(10),
                reserve_out: reserve_out.to_str_radix(10),
            })?;
        }
        Commands::QuoteIn {
            amount_out,
            reserves,
        } => {
            let amount = parse_amount(&amount_out)?;
            let reserve_in = parse_amount(&reserves.reserve_in)?;
            let reserve_out = parse_amount(&reserves.reserve_out)?;
            let amount_in = compute_amount_in(&amount, &reserve_in, &reserve_out)?;
            print_json(&QuoteOutput {
                amount_in: amount_in.to_str_radix(10),
                amount_out: amount.to_str_radix(10),
                reserve_in: reserve_in.to_str_radix(10),
                reserve_out: reserve_out.to_str_radix(10),
            })?;
        }
        Commands::InitialLiquidity { amount0, amount1 } => {
            let liquidity =
                compute_initial_liquidity(&parse_amount(&amount0)?, &parse_amount(&amount1)?);
            println!("{liquidity}");
        }
        Commands::EncodeSymbol { symbol } => {
            let encoded = encode_symbol(&symbol);
            // symbols too long for one felt still print their digit form
            let felt = encode_symbol_felt(&symbol).ok().map(felt_to_hex);
            print_json(&SymbolOutput {
                symbol,
                encoded,
                felt,
            })?;
        }
        Commands::DecodeSymbol { encoded } => {
            let symbol = decode_symbol(&encoded)?;
            print_json(&SymbolOutput {
                symbol,
                encoded,
                felt: None,
            })?;
        }
        Commands::Calldata { contract } => {
            let calldata = constructor_calldata(contract)?;
            print_json(&calldata.into_iter().map(felt_to_hex).collect::<Vec<_>>())?;
        }
        Commands::Artifact {
            path,
            check_calldata,
        } => {
            let artifact = ContractArtifact::load(&path)?;
            match artifact.constructor() {
                Some(entry) => println!("{}", entry.signature()),
                None => println!("no constructor"),
            }
            if !check_calldata.is_empty() {
                let calldata = parse_felt_vec(&check_calldata)?;
                artifact.check_constructor_calldata(&calldata)?;
                info!(felts = calldata.len(), "constructor calldata matches abi");
            }
        }
        Commands::Plan {
            config,
            out,
            check_artifacts: check,
        } => {
            let config_path = config.unwrap_or_else(config_path_from_env);
            let config = load_config(&config_path)?;
            let plan = build_plan(&config)?;
            if check {
                check_artifacts(&plan)?;
            }
            let json = plan.to_json()?;
            match out {
                Some(path) => {
                    fs::write(&path, json)?;
                    info!("wrote deployment plan to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
    }
    Ok(())
}

fn constructor_calldata(contract: ConstructorCommand) -> Result<Vec<Felt>, Box<dyn Error>> {
    let calldata = match contract {
        ConstructorCommand::Guardian { signer } => guardian_constructor(parse_felt(&signer)?),
        ConstructorCommand::Account { signer, guardian } => {
            let guardian = guardian.as_deref().map(parse_felt).transpose()?;
            account_constructor(parse_felt(&signer)?, guardian)
        }
        ConstructorCommand::Erc20 {
            owner,
            symbol,
            decimals,
        } => erc20_constructor(parse_felt(&owner)?, &symbol, decimals)?,
        ConstructorCommand::Pool { token0, token1 } => {
            pool_constructor(parse_felt(&token0)?, parse_felt(&token1)?)?
        }
        ConstructorCommand::Router { owner } => router_constructor(parse_felt(&owner)?),
    };
    Ok(calldata)
}

fn parse_felt_vec(values: &[String]) -> Result<Vec<Felt>, Box<dyn Error>> {
    let mut felts = Vec::with_capacity(values.len());
    for value in values {
        felts.push(parse_felt(value)?);
    }
    Ok(felts)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
