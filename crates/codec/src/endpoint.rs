//! Encryption service endpoints.
//!
//! A network identifier is either one of the known [`Network`] names or a
//! literal base URL (custom or staging deployments). The table is constant.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Base URL of the testnet encryption service.
pub const TESTNET_URL: &str = "https://pod-encryption-service-testnet.coti.io";

/// Base URL of the mainnet encryption service.
pub const MAINNET_URL: &str = "https://pod-encryption-service-mainnet.coti.io";

/// Path appended to the base URL for encrypt requests.
pub const ENCRYPT_PATH: &str = "/encrypt";

/// Networks with a well-known encryption service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Testnet,
    Mainnet,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Testnet, Network::Mainnet];

    pub fn as_str(self) -> &'static str {
        match self {
            Network::Testnet => "testnet",
            Network::Mainnet => "mainnet",
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Network::Testnet => TESTNET_URL,
            Network::Mainnet => MAINNET_URL,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown network: {0}")]
pub struct ParseNetworkError(pub String);

impl FromStr for Network {
    type Err = ParseNetworkError;

    /// Exact, case-sensitive match on the network name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| ParseNetworkError(s.to_owned()))
    }
}

/// Base URL for `network`: the table entry for a known name, else `network` itself.
pub fn resolve_base_url(network: &str) -> &str {
    match network.parse::<Network>() {
        Ok(n) => n.base_url(),
        Err(_) => network,
    }
}

/// Full encrypt URL for `network`, with a single trailing `/` removed from the base.
pub fn encrypt_url(network: &str) -> String {
    let base = resolve_base_url(network);
    let base = base.strip_suffix('/').unwrap_or(base);
    format!("{base}{ENCRYPT_PATH}")
}
