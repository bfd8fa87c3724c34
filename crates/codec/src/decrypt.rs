//! Decryption of PoD ciphertexts with the user's AES key.
//!
//! The cryptography lives behind [`Decryptor`]; this module only normalises
//! inputs and outputs. Zero-valued scalar ciphertexts (an uninitialised
//! on-chain slot) decode without calling the primitive.

use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use pod_common::{BoxError, Ciphertext, CtString, DataType, PodError};
use serde_json::Value;
use tracing::trace;

use crate::uint::{cell_to_uint, parse_uint};

/// Scalar and string decryption primitives keyed by a user AES key.
///
/// Errors are returned to the caller of [`decrypt`] unchanged.
#[cfg_attr(test, mockall::automock)]
pub trait Decryptor: Send + Sync {
    /// Decrypt one scalar ciphertext.
    fn decrypt_uint(&self, ciphertext: &BigUint, aes_key: &str) -> Result<BigUint, BoxError>;

    /// Decrypt every cell of a string ciphertext and reassemble the text.
    fn decrypt_string(&self, ciphertext: &CtString, aes_key: &str) -> Result<String, BoxError>;
}

impl<T: Decryptor + ?Sized> Decryptor for &T {
    fn decrypt_uint(&self, ciphertext: &BigUint, aes_key: &str) -> Result<BigUint, BoxError> {
        (**self).decrypt_uint(ciphertext, aes_key)
    }

    fn decrypt_string(&self, ciphertext: &CtString, aes_key: &str) -> Result<String, BoxError> {
        (**self).decrypt_string(ciphertext, aes_key)
    }
}

impl<T: Decryptor + ?Sized> Decryptor for Box<T> {
    fn decrypt_uint(&self, ciphertext: &BigUint, aes_key: &str) -> Result<BigUint, BoxError> {
        (**self).decrypt_uint(ciphertext, aes_key)
    }

    fn decrypt_string(&self, ciphertext: &CtString, aes_key: &str) -> Result<String, BoxError> {
        (**self).decrypt_string(ciphertext, aes_key)
    }
}

impl<T: Decryptor + ?Sized> Decryptor for Arc<T> {
    fn decrypt_uint(&self, ciphertext: &BigUint, aes_key: &str) -> Result<BigUint, BoxError> {
        (**self).decrypt_uint(ciphertext, aes_key)
    }

    fn decrypt_string(&self, ciphertext: &CtString, aes_key: &str) -> Result<String, BoxError> {
        (**self).decrypt_string(ciphertext, aes_key)
    }
}

/// Decrypt `ciphertext` to its plaintext string.
///
/// Scalars come back as decimal text, `Bool` as `"true"`/`"false"`, and
/// `String` as the reassembled text.
///
/// # Errors
///
/// - [`PodError::MissingKey`] if `aes_key` is blank, checked before anything else.
/// - [`PodError::CiphertextJson`] for string ciphertext text that is not JSON.
/// - [`PodError::InvalidCiphertext`] for non-integer scalars or cells.
/// - [`PodError::CiphertextMismatch`] for structured input with a scalar type.
/// - [`PodError::Decryption`] for anything the primitive reports.
pub fn decrypt<D>(
    decryptor: &D,
    ciphertext: impl Into<Ciphertext>,
    aes_key: &str,
    data_type: DataType,
) -> Result<String, PodError>
where
    D: Decryptor + ?Sized,
{
    let key = aes_key.trim();
    if key.is_empty() {
        return Err(PodError::MissingKey);
    }

    if data_type.is_string() {
        decrypt_string(decryptor, ciphertext.into(), key)
    } else {
        decrypt_scalar(decryptor, ciphertext.into(), key, data_type)
    }
}

fn decrypt_string<D>(decryptor: &D, ciphertext: Ciphertext, key: &str) -> Result<String, PodError>
where
    D: Decryptor + ?Sized,
{
    let parsed = match ciphertext {
        Ciphertext::Text(text) => serde_json::from_str(&text).map_err(PodError::CiphertextJson)?,
        Ciphertext::Parsed(value) => value,
    };

    // A missing or non-array `value` is an empty string ciphertext.
    let cells = match parsed.get("value").and_then(Value::as_array) {
        Some(cells) => cells.iter().map(cell_to_uint).collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };
    trace!(cells = cells.len(), "decrypting string ciphertext");

    decryptor
        .decrypt_string(&CtString { value: cells }, key)
        .map_err(PodError::Decryption)
}

fn decrypt_scalar<D>(
    decryptor: &D,
    ciphertext: Ciphertext,
    key: &str,
    data_type: DataType,
) -> Result<String, PodError>
where
    D: Decryptor + ?Sized,
{
    let text = match ciphertext {
        Ciphertext::Text(text) | Ciphertext::Parsed(Value::String(text)) => text,
        Ciphertext::Parsed(_) => return Err(PodError::CiphertextMismatch),
    };

    let raw = text.trim();
    if raw.is_empty() || raw == "0x" || raw == "0x0" {
        return Ok(zero_plaintext(data_type));
    }

    let value = parse_uint(raw)?;
    if value.is_zero() {
        return Ok(zero_plaintext(data_type));
    }

    let plaintext = decryptor
        .decrypt_uint(&value, key)
        .map_err(PodError::Decryption)?;

    Ok(match data_type {
        DataType::Bool => bool_text(plaintext.is_one()),
        _ => plaintext.to_string(),
    })
}

/// Plaintext of an uninitialised (zero) scalar slot.
fn zero_plaintext(data_type: DataType) -> String {
    match data_type {
        DataType::Bool => bool_text(false),
        _ => "0".to_owned(),
    }
}

fn bool_text(value: bool) -> String {
    let text = if value { "true" } else { "false" };
    text.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const KEY: &str = "00112233445566778899aabbccddeeff";

    fn untouched() -> MockDecryptor {
        let mut mock = MockDecryptor::new();
        mock.expect_decrypt_uint().never();
        mock.expect_decrypt_string().never();
        mock
    }

    fn uint_returning(result: u64) -> MockDecryptor {
        let mut mock = MockDecryptor::new();
        mock.expect_decrypt_uint()
            .times(1)
            .returning(move |_, _| Ok(BigUint::from(result)));
        mock
    }

    #[test]
    fn zero_ciphertexts_short_circuit() {
        let mock = untouched();
        assert_eq!(decrypt(&mock, "0x0", KEY, DataType::Uint64).unwrap(), "0");
        assert_eq!(decrypt(&mock, "", KEY, DataType::Bool).unwrap(), "false");
        assert_eq!(decrypt(&mock, "0x", KEY, DataType::Uint64).unwrap(), "0");
        assert_eq!(decrypt(&mock, "  0x0 \n", KEY, DataType::Uint8).unwrap(), "0");
    }

    #[test]
    fn parsed_zero_short_circuits() {
        let mock = untouched();
        assert_eq!(decrypt(&mock, "0x0000", KEY, DataType::Uint256).unwrap(), "0");
        assert_eq!(decrypt(&mock, "0", KEY, DataType::Bool).unwrap(), "false");
    }

    #[test]
    fn scalar_is_passed_to_primitive_as_integer() {
        let mut mock = MockDecryptor::new();
        mock.expect_decrypt_uint()
            .withf(|ct, key| *ct == BigUint::from(0xabcdu32) && key == KEY)
            .times(1)
            .returning(|_, _| Ok(BigUint::from(42u32)));

        assert_eq!(decrypt(&mock, "0xabcd", KEY, DataType::Uint64).unwrap(), "42");
    }

    #[test]
    fn key_is_trimmed_before_use() {
        let mut mock = MockDecryptor::new();
        mock.expect_decrypt_uint()
            .withf(|_, key| key == KEY)
            .times(1)
            .returning(|_, _| Ok(BigUint::from(1u32)));

        let padded = format!("  {KEY}\t");
        assert_eq!(decrypt(&mock, "0x1f", &padded, DataType::Uint32).unwrap(), "1");
    }

    #[test]
    fn large_results_render_as_decimal() {
        let mut mock = MockDecryptor::new();
        mock.expect_decrypt_uint()
            .returning(|_, _| Ok(BigUint::from(u128::MAX)));

        assert_eq!(
            decrypt(&mock, "0x99", KEY, DataType::Uint128).unwrap(),
            u128::MAX.to_string()
        );
    }

    #[test]
    fn bool_maps_one_to_true() {
        assert_eq!(decrypt(&uint_returning(1), "0x5", KEY, DataType::Bool).unwrap(), "true");
    }

    #[test]
    fn bool_maps_other_values_to_false() {
        assert_eq!(decrypt(&uint_returning(0), "0x5", KEY, DataType::Bool).unwrap(), "false");
        assert_eq!(decrypt(&uint_returning(2), "0x5", KEY, DataType::Bool).unwrap(), "false");
    }

    #[test]
    fn empty_key_always_rejected() {
        for t in DataType::ALL {
            let err = decrypt(&untouched(), "0x1234", "", t).unwrap_err();
            assert_eq!(err.to_string(), "AES key is required");
            let err = decrypt(&untouched(), "not even a ciphertext", "   ", t).unwrap_err();
            assert!(matches!(err, PodError::MissingKey));
        }
    }

    #[test]
    fn plus_signed_decimal_is_decrypted() {
        let mut mock = MockDecryptor::new();
        mock.expect_decrypt_uint()
            .withf(|ct, _| *ct == BigUint::from(5u32))
            .times(1)
            .returning(|_, _| Ok(BigUint::from(8u32)));

        assert_eq!(decrypt(&mock, "+5", KEY, DataType::Uint64).unwrap(), "8");
        assert_eq!(decrypt(&untouched(), "+0", KEY, DataType::Bool).unwrap(), "false");
    }

    #[test]
    fn non_numeric_scalar_is_rejected() {
        let err = decrypt(&untouched(), "0xnope", KEY, DataType::Uint64).unwrap_err();
        assert!(matches!(err, PodError::InvalidCiphertext(_)));
    }

    #[test]
    fn structured_scalar_is_rejected() {
        let err = decrypt(&untouched(), json!({"value": ["1"]}), KEY, DataType::Uint64).unwrap_err();
        assert!(matches!(err, PodError::CiphertextMismatch));
    }

    #[test]
    fn parsed_json_string_counts_as_text() {
        assert_eq!(
            decrypt(&uint_returning(9), json!("0x10"), KEY, DataType::Uint16).unwrap(),
            "9"
        );
    }

    #[test]
    fn primitive_errors_propagate_unchanged() {
        let mut mock = MockDecryptor::new();
        mock.expect_decrypt_uint()
            .returning(|_, _| Err("invalid MAC".into()));

        let err = decrypt(&mock, "0x1", KEY, DataType::Uint64).unwrap_err();
        assert!(matches!(err, PodError::Decryption(_)));
        assert_eq!(err.to_string(), "invalid MAC");
    }

    fn string_mock(expected: Vec<u32>, plaintext: &'static str) -> MockDecryptor {
        let mut mock = MockDecryptor::new();
        mock.expect_decrypt_string()
            .withf(move |ct, key| {
                ct.value == expected.iter().copied().map(BigUint::from).collect::<Vec<_>>()
                    && key == KEY
            })
            .times(1)
            .returning(move |_, _| Ok(plaintext.to_owned()));
        mock
    }

    #[test]
    fn string_accepts_json_text_and_parsed_structure() {
        let text = r#"{"value": ["0x0a", 11, "12"]}"#;
        let parsed = json!({"value": ["0x0a", 11, "12"]});

        let from_text = decrypt(&string_mock(vec![10, 11, 12], "hello"), text, KEY, DataType::String);
        let from_parsed =
            decrypt(&string_mock(vec![10, 11, 12], "hello"), parsed, KEY, DataType::String);

        assert_eq!(from_text.unwrap(), "hello");
        assert_eq!(from_parsed.unwrap(), "hello");
    }

    #[test]
    fn string_without_value_decrypts_no_cells() {
        let mock = string_mock(vec![], "");
        assert_eq!(decrypt(&mock, "{}", KEY, DataType::String).unwrap(), "");
    }

    #[test]
    fn string_with_non_array_value_decrypts_no_cells() {
        let mock = string_mock(vec![], "");
        assert_eq!(
            decrypt(&mock, json!({"value": "0x01"}), KEY, DataType::String).unwrap(),
            ""
        );
    }

    #[test]
    fn string_rejects_malformed_json() {
        let err = decrypt(&untouched(), "{value: [", KEY, DataType::String).unwrap_err();
        assert!(matches!(err, PodError::CiphertextJson(_)));
    }

    #[test]
    fn string_rejects_non_integer_cell() {
        let err =
            decrypt(&untouched(), json!({"value": ["abc"]}), KEY, DataType::String).unwrap_err();
        assert!(matches!(err, PodError::InvalidCiphertext(_)));
    }

    #[test]
    fn works_through_smart_pointers() {
        let shared: Arc<dyn Decryptor> = Arc::new(uint_returning(3));
        assert_eq!(decrypt(&shared, "0x7", KEY, DataType::Uint8).unwrap(), "3");
    }
}
