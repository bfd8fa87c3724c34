//! Client for the PoD encryption service.
//!
//! One `POST {base}/encrypt` per call. No retries, caching, or local state:
//! timeouts and TLS policy come from the injected [`reqwest::Client`].

use pod_common::protocol::{parse_scalar_response, parse_string_response, EncryptRequest};
use pod_common::{DataType, EncryptedValue, PodError};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::endpoint;

/// Encrypts plaintext values through the PoD encryption service.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone, Default)]
pub struct EncryptionClient {
    http: reqwest::Client,
}

impl EncryptionClient {
    /// Client with reqwest's default transport settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Client sending requests through `http`.
    pub fn with_http_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Encrypt `value` as `data_type` using the service for `network`.
    ///
    /// `network` is `"testnet"`, `"mainnet"`, or a literal base URL.
    ///
    /// # Errors
    ///
    /// - [`PodError::Transport`] if the request cannot be sent or read.
    /// - [`PodError::Service`] on a non-success status, with the body text.
    /// - [`PodError::InvalidJson`] / [`PodError::MalformedResponse`] if the
    ///   body is not a valid encrypt response for `data_type`.
    #[instrument(skip(self, value), fields(url = tracing::field::Empty))]
    pub async fn encrypt(
        &self,
        value: &str,
        network: &str,
        data_type: DataType,
    ) -> Result<EncryptedValue, PodError> {
        let url = endpoint::encrypt_url(network);
        tracing::Span::current().record("url", url.as_str());

        debug!("sending encrypt request");
        let response = self
            .http
            .post(&url)
            .json(&EncryptRequest::new(data_type, value))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(transport)?;
            warn!(status = status.as_u16(), "encryption service rejected request");
            return Err(PodError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(transport)?;
        let body: Value = serde_json::from_slice(&bytes).map_err(PodError::InvalidJson)?;

        let encrypted = if data_type.is_string() {
            parse_string_response(&body)?.into()
        } else {
            parse_scalar_response(&body)?.into()
        };
        debug!(status = status.as_u16(), "encrypt response accepted");

        Ok(encrypted)
    }
}

fn transport(err: reqwest::Error) -> PodError {
    PodError::Transport(Box::new(err))
}
