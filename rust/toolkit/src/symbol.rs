//! Token symbol codec.
//!
//! A symbol is encoded as the decimal codes of its UTF-8 bytes concatenated with no
//! separator ("UNI" -> "857873"). Decoding reads fixed two-digit groups, so it only
//! inverts the encoding when every byte code lies in `10..=99`. Uppercase ASCII
//! tickers (65..=90) satisfy this; anything else round-trips incorrectly. Tokens
//! already deployed carry symbols in this form, so the scheme is kept as is.

use num_bigint::BigUint;
use starknet::core::types::Felt;
use starknet::core::utils::cairo_short_string_to_felt;
use tracing::debug;

use crate::error::ToolkitError;
use crate::utils::biguint_to_felt;

pub fn encode_symbol(symbol: &str) -> String {
    symbol.bytes().map(|byte| byte.to_string()).collect()
}

/// Reverses [`encode_symbol`] for symbols whose byte codes are all two digits.
pub fn decode_symbol(encoded: &str) -> Result<String, ToolkitError> {
    if encoded.len() % 2 != 0 {
        return Err(ToolkitError::InvalidEncoding(format!("odd length {}", encoded.len())));
    }
    if let Some(bad) = encoded.chars().find(|ch| !ch.is_ascii_digit()) {
        return Err(ToolkitError::InvalidEncoding(format!(
            "non-digit character {bad:?}"
        )));
    }

    let decoded = encoded
        .as_bytes()
        .chunks(2)
        .map(|pair| char::from((pair[0] - b'0') * 10 + (pair[1] - b'0')))
        .collect();
    Ok(decoded)
}

/// Encoded symbol as a single field element, the form token constructors take.
pub fn encode_symbol_felt(symbol: &str) -> Result<Felt, ToolkitError> {
    let encoded = encode_symbol(symbol);
    if encoded.is_empty() {
        return Err(ToolkitError::InvalidInput("empty symbol".to_string()));
    }
    let value = BigUint::parse_bytes(encoded.as_bytes(), 10)
        .ok_or_else(|| ToolkitError::InvalidInput(format!("symbol {symbol:?}")))?;
    let felt = biguint_to_felt(&value).map_err(|_| {
        ToolkitError::InvalidInput(format!("symbol {symbol:?} does not fit in a felt"))
    })?;
    debug!(symbol, %encoded, "encoded symbol");
    Ok(felt)
}

/// Cairo short string: the ASCII bytes read as one big-endian integer.
pub fn short_string_to_felt(text: &str) -> Result<Felt, ToolkitError> {
    cairo_short_string_to_felt(text)
        .map_err(|err| ToolkitError::InvalidInput(format!("short string {text:?}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::{decode_symbol, encode_symbol, encode_symbol_felt, short_string_to_felt};
    use crate::error::ToolkitError;
    use proptest::prelude::*;
    use starknet::core::types::Felt;

    #[test]
    fn encodes_ticker() {
        assert_eq!(encode_symbol("UNI"), "857873");
        assert_eq!(encode_symbol("ETH"), "698472");
        assert_eq!(encode_symbol(""), "");
    }

    #[test]
    fn decodes_ticker() {
        assert_eq!(decode_symbol("857873").expect("decode"), "UNI");
        // an extra "80" group is a 'P', not part of any code
        assert_eq!(decode_symbol("85788073").expect("decode"), "UNPI");
    }

    #[test]
    fn multibyte_characters_encode_per_byte() {
        // 'é' is 0xC3 0xA9 in UTF-8
        assert_eq!(encode_symbol("é"), "195169");
    }

    #[test]
    fn three_digit_codes_do_not_round_trip() {
        let encoded = encode_symbol("eth");
        assert_eq!(encoded, "101116104");
        assert!(matches!(
            decode_symbol(&encoded),
            Err(ToolkitError::InvalidEncoding(_))
        ));
        assert_ne!(decode_symbol("1011161040").expect("even length"), "eth");
    }

    #[test]
    fn single_digit_codes_shift_the_grouping() {
        let encoded = encode_symbol("\u{5}A");
        assert_eq!(encoded, "565");
        assert!(decode_symbol(&encoded).is_err());
    }

    #[test]
    fn rejects_odd_length() {
        assert!(matches!(
            decode_symbol("857"),
            Err(ToolkitError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn rejects_non_digits() {
        assert!(matches!(
            decode_symbol("85x8"),
            Err(ToolkitError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn symbol_felt_is_decimal_value() {
        let felt = encode_symbol_felt("UNI").expect("felt");
        assert_eq!(felt, Felt::from(857873u64));
        assert_eq!(felt, Felt::from_hex("0xd1711").expect("hex"));
    }

    #[test]
    fn symbol_felt_rejects_oversized_symbol() {
        let long = "Z".repeat(40);
        assert!(encode_symbol_felt(&long).is_err());
        assert!(encode_symbol_felt("").is_err());
    }

    #[test]
    fn short_string_matches_big_endian_bytes() {
        assert_eq!(
            short_string_to_felt("UNI").expect("short string"),
            Felt::from(5590601u64)
        );
    }

    proptest! {
        #[test]
        fn two_digit_codes_round_trip(bytes in proptest::collection::vec(10u8..=99, 0..31)) {
            let symbol: String = bytes.into_iter().map(char::from).collect();
            let decoded = decode_symbol(&encode_symbol(&symbol)).unwrap();
            prop_assert_eq!(decoded, symbol);
        }
    }
}
