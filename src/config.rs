//! Adapter runtime configuration.
//!
//! The adapter is constructed from a raw JSON blob handed down by the
//! indexing layer, so the config is a plain serde struct.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ChainError;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP(S) URL of the node's JSON-RPC endpoint.
    pub rpc_url: String,
    #[serde(default)]
    pub rpc_user: Option<String>,
    #[serde(default)]
    pub rpc_pass: Option<String>,
    /// bitcoind-style `username:password` cookie file, used when no explicit
    /// credentials are set.
    #[serde(default)]
    pub cookie_file: Option<PathBuf>,
    /// Short coin identifier (e.g. `DVT`); selects the fee-estimation path.
    pub coin_shortcut: String,
    #[serde(default)]
    pub requests_per_second: Option<u32>,
}

impl Config {
    pub fn from_json(raw: &str) -> Result<Self, ChainError> {
        serde_json::from_str(raw)
            .map_err(|e| ChainError::InvalidConfig(format!("invalid adapter config: {e}")))
    }
}
