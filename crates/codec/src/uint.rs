//! Arbitrary-precision integer parsing for ciphertexts.

use num_bigint::BigUint;
use num_traits::{FromPrimitive, Zero};
use pod_common::PodError;
use serde_json::Value;

/// Parse integer text: `0x`, `0o` and `0b` prefixes (any case) or plain decimal.
///
/// Empty text is zero. Decimal text may carry a leading `+`. Negative values,
/// separators and inner whitespace are rejected.
pub fn parse_uint(text: &str) -> Result<BigUint, PodError> {
    if text.is_empty() {
        return Ok(BigUint::zero());
    }

    let (digits, radix) = match text.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => (&text[2..], 16),
        Some("0o") => (&text[2..], 8),
        Some("0b") => (&text[2..], 2),
        _ => (text.strip_prefix('+').unwrap_or(text), 10),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(PodError::InvalidCiphertext(format!(
            "`{text}` is not an unsigned integer"
        )));
    }

    BigUint::parse_bytes(digits.as_bytes(), radix).ok_or_else(|| {
        PodError::InvalidCiphertext(format!("`{text}` is not an unsigned integer"))
    })
}

/// Convert one ctString cell, given as a JSON number or integer text.
pub fn cell_to_uint(cell: &Value) -> Result<BigUint, PodError> {
    match cell {
        Value::String(s) => parse_uint(s.trim()),
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return Ok(BigUint::from(v));
            }
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .and_then(BigUint::from_f64)
                .ok_or_else(|| {
                    PodError::InvalidCiphertext(format!("cell {n} is not an unsigned integer"))
                })
        }
        other => Err(PodError::InvalidCiphertext(format!(
            "cell {other} is neither a number nor a string"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_decimal_and_prefixed_forms() {
        assert_eq!(parse_uint("255").unwrap(), BigUint::from(255u32));
        assert_eq!(parse_uint("0xff").unwrap(), BigUint::from(255u32));
        assert_eq!(parse_uint("0XFF").unwrap(), BigUint::from(255u32));
        assert_eq!(parse_uint("0o377").unwrap(), BigUint::from(255u32));
        assert_eq!(parse_uint("0b11111111").unwrap(), BigUint::from(255u32));
    }

    #[test]
    fn parses_full_width_uint256() {
        let text = format!("0x{}", "f".repeat(64));
        let parsed = parse_uint(&text).unwrap();
        assert_eq!(parsed.bits(), 256);
    }

    #[test]
    fn decimal_accepts_leading_plus() {
        assert_eq!(parse_uint("+5").unwrap(), BigUint::from(5u32));
        assert!(parse_uint("+0").unwrap().is_zero());
    }

    #[test]
    fn empty_text_is_zero() {
        assert!(parse_uint("").unwrap().is_zero());
    }

    #[test]
    fn rejects_non_numeric() {
        assert!(parse_uint("0x").is_err());
        assert!(parse_uint("0xzz").is_err());
        assert!(parse_uint("-5").is_err());
        assert!(parse_uint("+0x5").is_err());
        assert!(parse_uint("+").is_err());
        assert!(parse_uint("1_000").is_err());
        assert!(parse_uint("12 34").is_err());
    }

    #[test]
    fn cells_accept_numbers_and_strings() {
        assert_eq!(cell_to_uint(&json!(7)).unwrap(), BigUint::from(7u32));
        assert_eq!(cell_to_uint(&json!("0x10")).unwrap(), BigUint::from(16u32));
        assert_eq!(
            cell_to_uint(&json!(1e20)).unwrap(),
            BigUint::parse_bytes(b"100000000000000000000", 10).unwrap()
        );
    }

    #[test]
    fn cells_reject_other_types() {
        assert!(cell_to_uint(&json!(null)).is_err());
        assert!(cell_to_uint(&json!(-1)).is_err());
        assert!(cell_to_uint(&json!(1.5)).is_err());
        assert!(cell_to_uint(&json!({"value": 1})).is_err());
    }
}
