//! Value types shared by the encrypt and decrypt paths.
//!
//! A [`DataType`] decides which [`EncryptedValue`] variant a service response
//! must take and which decode path applies on the way back. The encrypted
//! forms are not self-describing, so callers keep the `DataType` alongside.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

// ---------------------------------------------------------------------------
// DataType
// ---------------------------------------------------------------------------

/// Plaintext types understood by the encryption service and the PoD contracts.
///
/// The variants mirror the MPC data types used on-chain (`IT_*` input types).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Bool,
    Uint8,
    Uint16,
    Uint32,
    #[default]
    Uint64,
    Uint128,
    Uint256,
    String,
}

impl DataType {
    /// Every supported type, in declaration order.
    pub const ALL: [DataType; 8] = [
        DataType::Bool,
        DataType::Uint8,
        DataType::Uint16,
        DataType::Uint32,
        DataType::Uint64,
        DataType::Uint128,
        DataType::Uint256,
        DataType::String,
    ];

    /// Name sent as the `type` field of an encrypt request.
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Bool => "bool",
            DataType::Uint8 => "uint8",
            DataType::Uint16 => "uint16",
            DataType::Uint32 => "uint32",
            DataType::Uint64 => "uint64",
            DataType::Uint128 => "uint128",
            DataType::Uint256 => "uint256",
            DataType::String => "string",
        }
    }

    /// `true` for [`DataType::String`], whose ciphertext is split into cells.
    pub fn is_string(self) -> bool {
        matches!(self, DataType::String)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [`DataType`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown data type: {0}")]
pub struct ParseDataTypeError(pub String);

impl FromStr for DataType {
    type Err = ParseDataTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDataTypeError(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Encrypted values
// ---------------------------------------------------------------------------

/// Encrypted form of any non-string [`DataType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedScalar {
    /// Opaque ciphertext, usually `0x`-prefixed hex.
    pub ciphertext: String,
    /// Service signature authenticating `ciphertext`.
    pub signature: String,
}

/// Older name for [`EncryptedScalar`], from when only `uint64` was supported.
pub type EncryptedUint64 = EncryptedScalar;

/// Cell list of an encrypted string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringCiphertext {
    pub value: Vec<String>,
}

/// Encrypted form of a [`DataType::String`] value: one signature per cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedString {
    pub ciphertext: StringCiphertext,
    pub signature: Vec<String>,
}

/// Result of an encrypt call.
///
/// Serialised untagged, so the JSON form is exactly the service response shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EncryptedValue {
    Scalar(EncryptedScalar),
    String(EncryptedString),
}

impl EncryptedValue {
    pub fn as_scalar(&self) -> Option<&EncryptedScalar> {
        match self {
            EncryptedValue::Scalar(s) => Some(s),
            EncryptedValue::String(_) => None,
        }
    }

    pub fn as_string(&self) -> Option<&EncryptedString> {
        match self {
            EncryptedValue::String(s) => Some(s),
            EncryptedValue::Scalar(_) => None,
        }
    }

    /// Drop the signature(s) and keep the ciphertext as a decrypt input.
    pub fn into_ciphertext(self) -> Ciphertext {
        match self {
            EncryptedValue::Scalar(s) => Ciphertext::Text(s.ciphertext),
            EncryptedValue::String(s) => s.ciphertext.into(),
        }
    }
}

impl From<EncryptedScalar> for EncryptedValue {
    fn from(value: EncryptedScalar) -> Self {
        EncryptedValue::Scalar(value)
    }
}

impl From<EncryptedString> for EncryptedValue {
    fn from(value: EncryptedString) -> Self {
        EncryptedValue::String(value)
    }
}

// ---------------------------------------------------------------------------
// Decrypt inputs
// ---------------------------------------------------------------------------

/// Ciphertext handed to the decrypt path.
///
/// Scalars arrive as text (hex or decimal, typically read from a contract).
/// Strings arrive either as JSON text or as an already-parsed ctString
/// structure `{"value": [...]}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Ciphertext {
    Text(String),
    Parsed(serde_json::Value),
}

impl From<&str> for Ciphertext {
    fn from(value: &str) -> Self {
        Ciphertext::Text(value.to_owned())
    }
}

impl From<String> for Ciphertext {
    fn from(value: String) -> Self {
        Ciphertext::Text(value)
    }
}

impl From<serde_json::Value> for Ciphertext {
    fn from(value: serde_json::Value) -> Self {
        Ciphertext::Parsed(value)
    }
}

impl From<StringCiphertext> for Ciphertext {
    fn from(value: StringCiphertext) -> Self {
        Ciphertext::Parsed(json!({ "value": value.value }))
    }
}

/// Input of the string-decryption primitive: one integer per encrypted cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CtString {
    pub value: Vec<BigUint>,
}
