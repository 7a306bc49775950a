//! Constructor and invoke calldata for the account, token, pool and router contracts.

use num_bigint::BigUint;
use serde::Serialize;
use starknet::core::types::{Call, Felt};
use starknet::core::utils::get_selector_from_name;

use crate::error::ToolkitError;
use crate::symbol::encode_symbol_felt;
use crate::utils::{felt_to_hex, split_u256, Address};

pub fn guardian_constructor(signer: Felt) -> Vec<Felt> {
    vec![signer]
}

pub fn account_constructor(signer: Felt, guardian: Option<Address>) -> Vec<Felt> {
    vec![signer, guardian.unwrap_or(Felt::ZERO)]
}

pub fn erc20_constructor(
    owner: Address,
    symbol: &str,
    decimals: u8,
) -> Result<Vec<Felt>, ToolkitError> {
    Ok(vec![owner, encode_symbol_felt(symbol)?, Felt::from(decimals)])
}

pub fn pool_constructor(token0: Address, token1: Address) -> Result<Vec<Felt>, ToolkitError> {
    if token0 == token1 {
        return Err(ToolkitError::InvalidInput(
            "pool tokens must be different".to_string(),
        ));
    }
    Ok(vec![token0, token1])
}

pub fn router_constructor(owner: Address) -> Vec<Felt> {
    vec![owner]
}

/// A contract call ready to hand to an account for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub to: Address,
    pub entrypoint: String,
    pub selector: Felt,
    pub calldata: Vec<Felt>,
}

impl Invocation {
    pub fn new(to: Address, entrypoint: &str, calldata: Vec<Felt>) -> Result<Self, ToolkitError> {
        let selector = get_selector_from_name(entrypoint)
            .map_err(|_| ToolkitError::InvalidInput(format!("bad entrypoint {entrypoint:?}")))?;
        Ok(Self {
            to,
            entrypoint: entrypoint.to_string(),
            selector,
            calldata,
        })
    }

    pub fn to_hex(&self) -> InvocationHex {
        InvocationHex {
            to: felt_to_hex(self.to),
            entrypoint: self.entrypoint.clone(),
            selector: felt_to_hex(self.selector),
            calldata: self.calldata.iter().copied().map(felt_to_hex).collect(),
        }
    }
}

impl From<Invocation> for Call {
    fn from(invocation: Invocation) -> Self {
        Call {
            to: invocation.to,
            selector: invocation.selector,
            calldata: invocation.calldata,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InvocationHex {
    pub to: String,
    pub entrypoint: String,
    pub selector: String,
    pub calldata: Vec<String>,
}

pub fn approve(
    token: Address,
    spender: Address,
    amount: &BigUint,
) -> Result<Invocation, ToolkitError> {
    let (low, high) = split_u256(amount)?;
    Invocation::new(token, "approve", vec![spender, low, high])
}

pub fn transfer(
    token: Address,
    recipient: Address,
    amount: &BigUint,
) -> Result<Invocation, ToolkitError> {
    let (low, high) = split_u256(amount)?;
    Invocation::new(token, "transfer", vec![recipient, low, high])
}

pub fn whitelist_pool(router: Address, pool: Address) -> Result<Invocation, ToolkitError> {
    Invocation::new(router, "whitelist_pool", vec![pool])
}

pub fn init_liquidity(
    router: Address,
    recipient: Address,
    token0: Address,
    token1: Address,
    amount0: &BigUint,
    amount1: &BigUint,
) -> Result<Invocation, ToolkitError> {
    let mut calldata = vec![recipient];
    calldata.extend(pair_calldata(token0, token1, amount0, amount1)?);
    Invocation::new(router, "init_liquidity", calldata)
}

pub fn add_liquidity(
    router: Address,
    token0: Address,
    token1: Address,
    amount0: &BigUint,
    amount1: &BigUint,
) -> Result<Invocation, ToolkitError> {
    let calldata = pair_calldata(token0, token1, amount0, amount1)?;
    Invocation::new(router, "add_liquidity", calldata)
}

fn pair_calldata(
    token0: Address,
    token1: Address,
    amount0: &BigUint,
    amount1: &BigUint,
) -> Result<Vec<Felt>, ToolkitError> {
    let (a0_low, a0_high) = split_u256(amount0)?;
    let (a1_low, a1_high) = split_u256(amount1)?;
    Ok(vec![token0, token1, a0_low, a0_high, a1_low, a1_high])
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    #[test]
    fn account_defaults_guardian_to_zero() {
        let data = account_constructor(Felt::from(7u8), None);
        assert_eq!(data, vec![Felt::from(7u8), Felt::ZERO]);
    }

    #[test]
    fn erc20_encodes_symbol() {
        let data = erc20_constructor(Felt::from(1u8), "UNI", 18).expect("calldata");
        assert_eq!(
            data,
            vec![Felt::from(1u8), Felt::from(857873u64), Felt::from(18u8)]
        );
    }

    #[test]
    fn pool_rejects_same_token() {
        assert!(pool_constructor(Felt::from(3u8), Felt::from(3u8)).is_err());
        assert_eq!(
            pool_constructor(Felt::from(3u8), Felt::from(4u8)).expect("calldata"),
            vec![Felt::from(3u8), Felt::from(4u8)]
        );
    }

    #[test]
    fn approve_splits_amount() {
        let amount = (BigUint::from(2u8) << 128u32) + BigUint::from(5u8);
        let call = approve(Felt::from(10u8), Felt::from(20u8), &amount).expect("call");
        assert_eq!(call.entrypoint, "approve");
        assert_eq!(call.to, Felt::from(10u8));
        assert_eq!(
            call.calldata,
            vec![Felt::from(20u8), Felt::from(5u8), Felt::from(2u8)]
        );
        assert_eq!(
            call.selector,
            get_selector_from_name("approve").expect("selector")
        );
    }

    #[test]
    fn init_liquidity_layout() {
        let call = init_liquidity(
            Felt::from(1u8),
            Felt::from(2u8),
            Felt::from(3u8),
            Felt::from(4u8),
            &BigUint::from(1000u32),
            &BigUint::from(4000u32),
        )
        .expect("call");
        assert_eq!(
            call.calldata,
            vec![
                Felt::from(2u8),
                Felt::from(3u8),
                Felt::from(4u8),
                Felt::from(1000u32),
                Felt::ZERO,
                Felt::from(4000u32),
                Felt::ZERO,
            ]
        );
    }

    #[test]
    fn add_liquidity_has_no_recipient() {
        let call = add_liquidity(
            Felt::from(1u8),
            Felt::from(3u8),
            Felt::from(4u8),
            &BigUint::from(1u8),
            &BigUint::from(2u8),
        )
        .expect("call");
        assert_eq!(call.calldata.len(), 6);
        assert_eq!(call.calldata[0], Felt::from(3u8));
    }

    #[test]
    fn invocation_converts_to_call() {
        let call: Call = whitelist_pool(Felt::from(1u8), Felt::from(9u8))
            .expect("call")
            .into();
        assert_eq!(call.to, Felt::from(1u8));
        assert_eq!(call.calldata, vec![Felt::from(9u8)]);
    }

    #[test]
    fn hex_view_uses_minimal_hex() {
        let call = transfer(Felt::from(255u8), Felt::from(16u8), &BigUint::from(1u8))
            .expect("call");
        let view = call.to_hex();
        assert_eq!(view.to, "0xff");
        assert_eq!(view.calldata, vec!["0x10", "0x1", "0x0"]);
    }
}
