//! Transport seam between the blockchain clients and the wire.

use async_trait::async_trait;

use crate::error::RpcError;

/// Executes a single JSON-RPC method call against the node.
///
/// `params` is serialized as the request's `params` member; pass
/// `serde_json::Value::Null` to omit it entirely (some DeVault methods take
/// no parameters and older nodes reject an explicit empty object).
///
/// A structured error reported by the node surfaces as
/// [`RpcError::Server`]; connectivity and serialization failures surface as
/// [`RpcError::Transport`] / [`RpcError::InvalidResponse`]. Concurrency
/// discipline, timeouts, and any retrying are the implementation's concern.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, RpcError>;
}
