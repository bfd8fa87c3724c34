//! Common types, wire protocol definitions, and errors shared across the PoD codec crates.

pub mod error;
pub mod protocol;
pub mod types;

pub use error::{BoxError, PodError, ResponseError};
pub use types::{
    Ciphertext, CtString, DataType, EncryptedScalar, EncryptedString, EncryptedUint64,
    EncryptedValue, ParseDataTypeError, StringCiphertext,
};
