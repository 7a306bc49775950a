//! Constant-product pricing with the pool's 0.3% swap fee.
//!
//! Rounding matches the deployed pool contract: amount-out rounds down, amount-in
//! rounds up by adding one after floor division. The two are therefore not exact
//! inverses of each other.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use tracing::debug;

use crate::error::ToolkitError;

pub const FEE_NUMERATOR: u32 = 997;
pub const FEE_DENOMINATOR: u32 = 1000;

/// Output amount for an exact `amount_in`, rounded down.
///
/// An empty input reserve has no price and fails with
/// [`ToolkitError::DivisionByZero`]; this includes the case where the formula's
/// denominator itself is zero.
pub fn compute_amount_out(
    amount_in: &BigUint,
    reserve_in: &BigUint,
    reserve_out: &BigUint,
) -> Result<BigUint, ToolkitError> {
    if reserve_in.is_zero() {
        return Err(ToolkitError::DivisionByZero);
    }
    let amount_in_with_fee = amount_in * FEE_NUMERATOR;
    let numerator = &amount_in_with_fee * reserve_out;
    let denominator = reserve_in * FEE_DENOMINATOR + &amount_in_with_fee;
    let amount_out = numerator / denominator;
    debug!(%amount_in, %reserve_in, %reserve_out, %amount_out, "computed amount out");
    Ok(amount_out)
}

/// Minimum input needed to receive exactly `amount_out`.
///
/// Fails with [`ToolkitError::InsufficientLiquidity`] unless
/// `amount_out < reserve_out`.
pub fn compute_amount_in(
    amount_out: &BigUint,
    reserve_in: &BigUint,
    reserve_out: &BigUint,
) -> Result<BigUint, ToolkitError> {
    if amount_out >= reserve_out {
        return Err(ToolkitError::InsufficientLiquidity);
    }
    let numerator = reserve_in * amount_out * FEE_DENOMINATOR;
    let denominator = (reserve_out - amount_out) * FEE_NUMERATOR;
    let amount_in = numerator / denominator + BigUint::one();
    debug!(%amount_out, %reserve_in, %reserve_out, %amount_in, "computed amount in");
    Ok(amount_in)
}

/// LP supply minted on the first deposit: `floor(sqrt(amount0 * amount1))`.
pub fn compute_initial_liquidity(amount0: &BigUint, amount1: &BigUint) -> BigUint {
    (amount0 * amount1).sqrt()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reserves {
    pub reserve_in: BigUint,
    pub reserve_out: BigUint,
}

impl Reserves {
    pub fn new(reserve_in: BigUint, reserve_out: BigUint) -> Self {
        Self {
            reserve_in,
            reserve_out,
        }
    }

    pub fn quote_out(&self, amount_in: &BigUint) -> Result<BigUint, ToolkitError> {
        compute_amount_out(amount_in, &self.reserve_in, &self.reserve_out)
    }

    pub fn quote_in(&self, amount_out: &BigUint) -> Result<BigUint, ToolkitError> {
        compute_amount_in(amount_out, &self.reserve_in, &self.reserve_out)
    }

    /// Same pool seen from the opposite swap direction.
    pub fn flipped(&self) -> Self {
        Self {
            reserve_in: self.reserve_out.clone(),
            reserve_out: self.reserve_in.clone(),
        }
    }
}
