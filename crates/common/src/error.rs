//! Error types shared across crates.

use thiserror::Error;

/// Boxed error produced by a collaborator (HTTP transport, decryption primitive).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error for encrypt and decrypt calls.
///
/// Nothing is recovered locally; every variant reaches the caller.
#[derive(Debug, Error)]
pub enum PodError {
    /// The encryption service answered with a non-success status.
    #[error("Encryption failed ({status}): {body}")]
    Service { status: u16, body: String },

    /// The request could not be sent or its response could not be read.
    #[error("encryption request failed: {0}")]
    Transport(#[source] BoxError),

    /// The response body was not JSON.
    #[error("encryption response is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The response JSON lacks, or mistypes, a required field.
    #[error(transparent)]
    MalformedResponse(#[from] ResponseError),

    /// The AES key was empty after trimming.
    #[error("AES key is required")]
    MissingKey,

    /// A string ciphertext given as text was not valid JSON.
    #[error("string ciphertext is not valid JSON: {0}")]
    CiphertextJson(#[source] serde_json::Error),

    /// A scalar ciphertext or a string cell is not a non-negative integer.
    #[error("invalid ciphertext: {0}")]
    InvalidCiphertext(String),

    /// A parsed ctString structure was passed for a scalar data type.
    #[error("scalar ciphertext must be text, got a structured value")]
    CiphertextMismatch,

    /// Failure reported by the decryption primitive, passed through as-is.
    #[error(transparent)]
    Decryption(BoxError),
}

impl PodError {
    /// HTTP status returned by the encryption service, if this is a service error.
    pub fn status(&self) -> Option<u16> {
        match self {
            PodError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Why an encryption service response could not be turned into an encrypted value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    /// One or more required fields are absent (or `null`).
    #[error("encryption response missing {0}")]
    MissingField(String),

    /// A field is present but has a JSON type that cannot be used.
    #[error("encryption response field `{0}` has an unexpected type")]
    InvalidField(&'static str),
}
