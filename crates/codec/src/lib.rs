//! PoD value codec.
//!
//! Encrypts plaintext values through the PoD encryption service and decrypts
//! the resulting ciphertexts with a user AES key.
//!
//! # Flow
//!
//! ```text
//! encrypt: value ──POST {base}/encrypt──► service ──► EncryptedValue
//! decrypt: Ciphertext + AES key ──► Decryptor primitive ──► plaintext string
//! ```
//!
//! The [`DataType`] used to encrypt must be passed again to decrypt; the
//! encrypted forms do not record it.

pub mod decrypt;
pub mod encrypt;
pub mod endpoint;
pub mod uint;

pub use decrypt::{decrypt, Decryptor};
pub use encrypt::EncryptionClient;
pub use endpoint::{encrypt_url, resolve_base_url, Network};
pub use pod_common::{
    BoxError, Ciphertext, CtString, DataType, EncryptedScalar, EncryptedString, EncryptedValue,
    PodError,
};

/// Encryption client and decryption primitives behind one handle.
#[derive(Debug, Clone)]
pub struct PodCrypto<D> {
    client: EncryptionClient,
    decryptor: D,
}

impl<D: Decryptor> PodCrypto<D> {
    pub fn new(decryptor: D) -> Self {
        Self::with_client(EncryptionClient::new(), decryptor)
    }

    pub fn with_client(client: EncryptionClient, decryptor: D) -> Self {
        Self { client, decryptor }
    }

    pub fn client(&self) -> &EncryptionClient {
        &self.client
    }

    pub fn decryptor(&self) -> &D {
        &self.decryptor
    }

    /// See [`EncryptionClient::encrypt`].
    pub async fn encrypt(
        &self,
        value: &str,
        network: &str,
        data_type: DataType,
    ) -> Result<EncryptedValue, PodError> {
        self.client.encrypt(value, network, data_type).await
    }

    /// See [`decrypt()`].
    pub fn decrypt(
        &self,
        ciphertext: impl Into<Ciphertext>,
        aes_key: &str,
        data_type: DataType,
    ) -> Result<String, PodError> {
        decrypt::decrypt(&self.decryptor, ciphertext, aes_key, data_type)
    }
}
