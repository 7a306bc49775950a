//! Starkswap deployment toolkit: AMM pricing, symbol encoding and calldata assembly.

mod artifact;
mod calldata;
mod config;
mod error;
mod plan;
mod pricing;
mod symbol;
mod utils;

pub use artifact::{AbiEntry, AbiParam, ContractArtifact};
pub use calldata::{
    account_constructor, add_liquidity, approve, erc20_constructor, guardian_constructor,
    init_liquidity, pool_constructor, router_constructor, transfer, whitelist_pool, Invocation,
    InvocationHex,
};
pub use config::{
    config_path_from_env, finalize_config, load_config, DeployConfig, RawAddresses, RawConfig,
    RawKeys, RawPoolSeed, RawToken, TokenConfig, CONFIG_ENV, DEFAULT_CONFIG_PATH,
};
pub use error::ToolkitError;
pub use plan::{
    build_plan, check_artifacts, expected_initial_liquidity, DeploymentPlan, PlanStep,
    StepAction,
};
pub use pricing::{
    compute_amount_in, compute_amount_out, compute_initial_liquidity, Reserves, FEE_DENOMINATOR,
    FEE_NUMERATOR,
};
pub use symbol::{decode_symbol, encode_symbol, encode_symbol_felt, short_string_to_felt};
pub use utils::{
    biguint_to_felt, felt_to_biguint, felt_to_decimal, felt_to_hex, felt_to_u128, join_u256,
    parse_amount, parse_felt, split_u256, Address,
};
