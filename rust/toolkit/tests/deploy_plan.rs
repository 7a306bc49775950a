use std::path::{Path, PathBuf};

use num_bigint::BigUint;
use starknet::core::types::Felt;

use starkswap_toolkit::{
    build_plan, check_artifacts, compute_amount_in, compute_amount_out, load_config,
    parse_amount, split_u256, ContractArtifact, StepAction, ToolkitError,
};

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

#[test]
fn fixture_config_builds_complete_plan() -> Result<(), ToolkitError> {
    let config = load_config(&fixtures_root().join("starkswap.toml"))?;
    assert_eq!(config.network, "devnet");
    assert_eq!(config.artifacts_dir, fixtures_root().join("artifacts"));

    let plan = build_plan(&config)?;
    assert_eq!(plan.pending().count(), 0);
    assert_eq!(plan.steps.first().map(|s| s.name.as_str()), Some("deploy_guardian"));
    assert_eq!(plan.expected_initial_liquidity, "1414213562373095048801");

    check_artifacts(&plan)?;
    Ok(())
}

#[test]
fn token_steps_carry_encoded_symbols() -> Result<(), ToolkitError> {
    let config = load_config(&fixtures_root().join("starkswap.toml"))?;
    let plan = build_plan(&config)?;
    let step = plan
        .steps
        .iter()
        .find(|step| step.name == "deploy_token_TKA")
        .ok_or_else(|| ToolkitError::InvalidInput("missing token step".to_string()))?;
    match &step.action {
        StepAction::Deploy {
            constructor_calldata,
            ..
        } => {
            // "TKA" -> 84 75 65
            assert_eq!(constructor_calldata[1], format!("{:#x}", 847565u64));
            assert_eq!(constructor_calldata[2], "0x12");
        }
        other => panic!("unexpected action {other:?}"),
    }
    Ok(())
}

#[test]
fn init_liquidity_amounts_quote_against_seeded_pool() -> Result<(), ToolkitError> {
    let config = load_config(&fixtures_root().join("starkswap.toml"))?;
    let amount_in = parse_amount("100000000000000000000")?;
    let amount_out = compute_amount_out(&amount_in, &config.token0_amount, &config.token1_amount)?;
    assert_eq!(amount_out, parse_amount("181322178776029826316")?);
    let back = compute_amount_in(&amount_out, &config.token0_amount, &config.token1_amount)?;
    assert_eq!(back, amount_in);

    let (low, high) = split_u256(&config.token1_amount)?;
    assert_eq!(high, Felt::ZERO);
    assert_eq!(BigUint::from_bytes_be(&low.to_bytes_be()), config.token1_amount);
    Ok(())
}

#[test]
fn artifact_mismatch_is_reported() -> Result<(), ToolkitError> {
    let artifact = ContractArtifact::load(&fixtures_root().join("artifacts").join("ERC20.json"))?;
    let err = artifact
        .check_constructor_calldata(&[Felt::ONE, Felt::TWO])
        .unwrap_err();
    assert!(matches!(err, ToolkitError::Artifact(_)));
    let approve = artifact
        .function("approve")
        .ok_or_else(|| ToolkitError::Artifact("approve missing".to_string()))?;
    assert_eq!(approve.calldata_len(&artifact)?, 3);
    Ok(())
}

#[test]
fn missing_config_file_is_config_error() {
    let err = load_config(&fixtures_root().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ToolkitError::Config(_)));
}
