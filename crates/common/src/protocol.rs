//! Wire types for the PoD encryption service.
//!
//! Requests are `POST {base}/encrypt` with an [`EncryptRequest`] JSON body.
//! Responses are decoded to [`serde_json::Value`] first and then validated by
//! [`parse_scalar_response`] or [`parse_string_response`], depending on the
//! [`DataType`](crate::DataType) that was requested.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ResponseError;
use crate::types::{DataType, EncryptedScalar, EncryptedString, StringCiphertext};

// ---------------------------------------------------------------------------
// Encrypt endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /encrypt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptRequest {
    /// Plaintext type, sent as its wire name (`"uint64"`, `"string"`, ...).
    #[serde(rename = "type")]
    pub data_type: DataType,
    /// Plaintext: a decimal number, `"true"`/`"false"`, or arbitrary text.
    pub value: String,
}

impl EncryptRequest {
    pub fn new(data_type: DataType, value: impl Into<String>) -> Self {
        Self {
            data_type,
            value: value.into(),
        }
    }
}

/// Legacy spelling of the scalar ciphertext key, still emitted by older services.
pub const LEGACY_CIPHERTEXT_KEY: &str = "cipherText";

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Validate a scalar encrypt response.
///
/// `ciphertext` is read from the `ciphertext` key, falling back to
/// [`LEGACY_CIPHERTEXT_KEY`]. Strings are taken as-is; numbers and booleans
/// are converted to text.
///
/// # Errors
///
/// [`ResponseError::MissingField`] names every absent field,
/// [`ResponseError::InvalidField`] flags objects or arrays.
pub fn parse_scalar_response(body: &Value) -> Result<EncryptedScalar, ResponseError> {
    let ciphertext = field(body, "ciphertext").or_else(|| field(body, LEGACY_CIPHERTEXT_KEY));
    let signature = field(body, "signature");

    let (ciphertext, signature) = match (ciphertext, signature) {
        (Some(c), Some(s)) => (c, s),
        (c, s) => {
            let mut missing = Vec::new();
            if c.is_none() {
                missing.push("ciphertext");
            }
            if s.is_none() {
                missing.push("signature");
            }
            return Err(ResponseError::MissingField(missing.join(" and ")));
        }
    };

    Ok(EncryptedScalar {
        ciphertext: scalar_text(ciphertext).ok_or(ResponseError::InvalidField("ciphertext"))?,
        signature: scalar_text(signature).ok_or(ResponseError::InvalidField("signature"))?,
    })
}

/// Validate a string encrypt response: `ciphertext.value` and `signature`
/// must both be arrays. Cells are converted to text like scalar fields.
///
/// # Errors
///
/// Same taxonomy as [`parse_scalar_response`].
pub fn parse_string_response(body: &Value) -> Result<EncryptedString, ResponseError> {
    let cells = field(body, "ciphertext").and_then(|ct| field(ct, "value"));
    let signature = field(body, "signature");

    let (cells, signature) = match (cells, signature) {
        (Some(c), Some(s)) => (c, s),
        (c, s) => {
            let mut missing = Vec::new();
            if c.is_none() {
                missing.push("ciphertext.value");
            }
            if s.is_none() {
                missing.push("signature");
            }
            return Err(ResponseError::MissingField(missing.join(" and ")));
        }
    };

    Ok(EncryptedString {
        ciphertext: StringCiphertext {
            value: text_array(cells, "ciphertext.value")?,
        },
        signature: text_array(signature, "signature")?,
    })
}

/// Non-null member `key` of `value`, if `value` is an object.
fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| !v.is_null())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text_array(value: &Value, name: &'static str) -> Result<Vec<String>, ResponseError> {
    value
        .as_array()
        .ok_or(ResponseError::InvalidField(name))?
        .iter()
        .map(|v| scalar_text(v).ok_or(ResponseError::InvalidField(name)))
        .collect()
}
