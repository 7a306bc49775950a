use num_bigint::BigUint;
use num_traits::{Num, One, ToPrimitive};
use starknet::core::types::Felt;

use crate::error::ToolkitError;

pub type Address = Felt;

const STARK_FIELD_MODULUS_HEX: &str =
    "800000000000011000000000000000000000000000000000000000000000001";

/// Parses a token amount given as a decimal or `0x` hex string.
pub fn parse_amount(value: &str) -> Result<BigUint, ToolkitError> {
    let value = value.trim();
    if value.starts_with('-') {
        return Err(ToolkitError::InvalidInput(format!(
            "amount must not be negative: {value}"
        )));
    }
    let (radix, digits) = match value.strip_prefix("0x") {
        Some(hex) => (16, hex),
        None => (10, value),
    };
    if digits.is_empty() {
        return Err(ToolkitError::InvalidInput("empty amount".to_string()));
    }
    BigUint::from_str_radix(digits, radix)
        .map_err(|_| ToolkitError::InvalidInput(format!("invalid amount: {value}")))
}

pub fn parse_felt(value: &str) -> Result<Felt, ToolkitError> {
    let value = value.trim();
    if value.starts_with("0x") {
        Felt::from_hex(value)
            .map_err(|_| ToolkitError::InvalidInput(format!("invalid felt: {value}")))
    } else {
        Felt::from_dec_str(value)
            .map_err(|_| ToolkitError::InvalidInput(format!("invalid felt: {value}")))
    }
}

pub fn felt_to_biguint(felt: &Felt) -> BigUint {
    BigUint::from_bytes_be(&felt.to_bytes_be())
}

pub fn biguint_to_felt(value: &BigUint) -> Result<Felt, ToolkitError> {
    if value >= &stark_field_modulus()? {
        return Err(ToolkitError::InvalidInput(
            "value exceeds Stark field".to_string(),
        ));
    }
    let bytes = biguint_to_bytes(value)?;
    Ok(Felt::from_bytes_be(&bytes))
}

/// Splits a value into the `(low, high)` 128-bit limbs of a Cairo `Uint256`.
pub fn split_u256(value: &BigUint) -> Result<(Felt, Felt), ToolkitError> {
    if value.bits() > 256 {
        return Err(ToolkitError::InvalidInput("value exceeds u256".to_string()));
    }
    let mask = (BigUint::one() << 128u32) - BigUint::one();
    let low = (value & &mask)
        .to_u128()
        .ok_or_else(|| ToolkitError::InvalidInput("u256 low limb".to_string()))?;
    let high = (value >> 128u32)
        .to_u128()
        .ok_or_else(|| ToolkitError::InvalidInput("u256 high limb".to_string()))?;
    Ok((Felt::from(low), Felt::from(high)))
}

pub fn join_u256(low: Felt, high: Felt) -> Result<BigUint, ToolkitError> {
    let low = felt_to_u128(&low)?;
    let high = felt_to_u128(&high)?;
    Ok((BigUint::from(high) << 128u32) | BigUint::from(low))
}

pub fn felt_to_u128(value: &Felt) -> Result<u128, ToolkitError> {
    let bytes = value.to_bytes_be();
    if bytes[..16].iter().any(|b| *b != 0) {
        return Err(ToolkitError::InvalidInput("felt exceeds u128".to_string()));
    }
    let mut buf = [0u8; 16];
    buf.copy_from_slice(&bytes[16..32]);
    Ok(u128::from_be_bytes(buf))
}

pub fn felt_to_hex(value: Felt) -> String {
    let encoded = hex::encode(value.to_bytes_be());
    let trimmed = encoded.trim_start_matches('0');
    if trimmed.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{trimmed}")
    }
}

pub fn felt_to_decimal(value: Felt) -> String {
    felt_to_biguint(&value).to_str_radix(10)
}

fn stark_field_modulus() -> Result<BigUint, ToolkitError> {
    BigUint::parse_bytes(STARK_FIELD_MODULUS_HEX.as_bytes(), 16)
        .ok_or_else(|| ToolkitError::InvalidInput("invalid Stark modulus".to_string()))
}

fn biguint_to_bytes(value: &BigUint) -> Result<[u8; 32], ToolkitError> {
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return Err(ToolkitError::InvalidInput("value too large".to_string()));
    }
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}
