//! Ordered deployment plan: the deploy and configuration steps for a fresh pool
//! setup, with calldata filled in wherever the config already knows the inputs.

use std::path::Path;

use num_bigint::BigUint;
use serde::Serialize;
use starknet::core::types::Felt;
use tracing::{info, warn};

use crate::artifact::ContractArtifact;
use crate::calldata::{
    account_constructor, approve, erc20_constructor, guardian_constructor, init_liquidity,
    pool_constructor, router_constructor, whitelist_pool, Invocation, InvocationHex,
};
use crate::config::DeployConfig;
use crate::error::ToolkitError;
use crate::pricing::compute_initial_liquidity;
use crate::utils::felt_to_hex;

pub const GUARDIAN_ARTIFACT: &str = "SCSKGuardian.json";
pub const ACCOUNT_ARTIFACT: &str = "Account.json";
pub const ERC20_ARTIFACT: &str = "ERC20.json";
pub const POOL_ARTIFACT: &str = "Pool.json";
pub const ROUTER_ARTIFACT: &str = "Router.json";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepAction {
    Deploy {
        artifact: String,
        salt: String,
        constructor_calldata: Vec<String>,
    },
    Invoke(InvocationHex),
    Pending {
        missing: Vec<String>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanStep {
    pub name: String,
    #[serde(flatten)]
    pub action: StepAction,
}

impl PlanStep {
    pub fn is_pending(&self) -> bool {
        matches!(self.action, StepAction::Pending { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeploymentPlan {
    pub network: String,
    pub rpc_url: String,
    pub steps: Vec<PlanStep>,
    pub expected_initial_liquidity: String,
}

impl DeploymentPlan {
    pub fn pending(&self) -> impl Iterator<Item = &PlanStep> {
        self.steps.iter().filter(|step| step.is_pending())
    }

    pub fn to_json(&self) -> Result<String, ToolkitError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn expected_initial_liquidity(config: &DeployConfig) -> BigUint {
    compute_initial_liquidity(&config.token0_amount, &config.token1_amount)
}

pub fn build_plan(config: &DeployConfig) -> Result<DeploymentPlan, ToolkitError> {
    let mut steps = Vec::new();

    if let Some(guardian_key) = config.guardian_public_key {
        steps.push(deploy_step(
            config,
            "deploy_guardian",
            GUARDIAN_ARTIFACT,
            guardian_constructor(guardian_key),
        ));
    }

    steps.push(deploy_step(
        config,
        "deploy_account",
        ACCOUNT_ARTIFACT,
        account_constructor(config.admin_public_key, config.guardian),
    ));

    for token in &config.tokens {
        let calldata = erc20_constructor(config.admin_account, &token.symbol, token.decimals)?;
        steps.push(deploy_step(
            config,
            &format!("deploy_token_{}", token.symbol),
            ERC20_ARTIFACT,
            calldata,
        ));
    }

    let token0 = config.tokens.first().and_then(|token| token.address);
    let token1 = config.tokens.get(1).and_then(|token| token.address);

    match (token0, token1) {
        (Some(token0), Some(token1)) => steps.push(deploy_step(
            config,
            "deploy_pool",
            POOL_ARTIFACT,
            pool_constructor(token0, token1)?,
        )),
        _ => steps.push(pending_step(
            "deploy_pool",
            missing(&[("tokens[0].address", token0), ("tokens[1].address", token1)]),
        )),
    }

    steps.push(deploy_step(
        config,
        "deploy_router",
        ROUTER_ARTIFACT,
        router_constructor(config.admin_account),
    ));

    match (config.router, config.pool) {
        (Some(router), Some(pool)) => {
            steps.push(invoke_step("whitelist_pool", whitelist_pool(router, pool)?))
        }
        (router, pool) => steps.push(pending_step(
            "whitelist_pool",
            missing(&[("addresses.router", router), ("addresses.pool", pool)]),
        )),
    }

    match (config.router, token0, token1) {
        (Some(router), Some(token0), Some(token1)) => {
            steps.push(invoke_step(
                "approve_token0",
                approve(token0, router, &config.token0_amount)?,
            ));
            steps.push(invoke_step(
                "approve_token1",
                approve(token1, router, &config.token1_amount)?,
            ));
            steps.push(invoke_step(
                "init_liquidity",
                init_liquidity(
                    router,
                    config.admin_account,
                    token0,
                    token1,
                    &config.token0_amount,
                    &config.token1_amount,
                )?,
            ));
        }
        (router, token0, token1) => {
            let absent = missing(&[
                ("addresses.router", router),
                ("tokens[0].address", token0),
                ("tokens[1].address", token1),
            ]);
            for name in ["approve_token0", "approve_token1", "init_liquidity"] {
                steps.push(pending_step(name, absent.clone()));
            }
        }
    }

    let plan = DeploymentPlan {
        network: config.network.clone(),
        rpc_url: config.rpc_url.to_string(),
        steps,
        expected_initial_liquidity: expected_initial_liquidity(config).to_str_radix(10),
    };
    for step in plan.pending() {
        if let StepAction::Pending { missing } = &step.action {
            warn!(step = %step.name, missing = ?missing, "plan step pending");
        }
    }
    info!(
        network = %plan.network,
        steps = plan.steps.len(),
        pending = plan.pending().count(),
        "built deployment plan"
    );
    Ok(plan)
}

fn deploy_step(
    config: &DeployConfig,
    name: &str,
    artifact: &str,
    calldata: Vec<Felt>,
) -> PlanStep {
    let salt = config.admin_public_key;
    PlanStep {
        name: name.to_string(),
        action: StepAction::Deploy {
            artifact: config.artifacts_dir.join(artifact).display().to_string(),
            salt: felt_to_hex(salt),
            constructor_calldata: calldata.into_iter().map(felt_to_hex).collect(),
        },
    }
}

/// Loads every artifact a deploy step names and checks its constructor arity.
pub fn check_artifacts(plan: &DeploymentPlan) -> Result<(), ToolkitError> {
    for step in &plan.steps {
        if let StepAction::Deploy {
            artifact,
            constructor_calldata,
            ..
        } = &step.action
        {
            let loaded = ContractArtifact::load(Path::new(artifact))?;
            loaded
                .check_constructor_len(constructor_calldata.len())
                .map_err(|err| ToolkitError::Artifact(format!("{}: {err}", step.name)))?;
        }
    }
    Ok(())
}

fn invoke_step(name: &str, invocation: Invocation) -> PlanStep {
    PlanStep {
        name: name.to_string(),
        action: StepAction::Invoke(invocation.to_hex()),
    }
}

fn pending_step(name: &str, missing: Vec<String>) -> PlanStep {
    PlanStep {
        name: name.to_string(),
        action: StepAction::Pending { missing },
    }
}

fn missing(inputs: &[(&str, Option<Felt>)]) -> Vec<String> {
    inputs
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name.to_string())
        .collect()
}
