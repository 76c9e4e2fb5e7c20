//! Generic bitcoind-style implementation of [`BlockChain`].
//!
//! This is the delegation target for per-coin adapters: it speaks the
//! standard request shapes (numeric `getblock` verbosity, parameterized
//! `estimatefee`) and owns the error-classification and block-merge helpers
//! the adapters share.

use std::sync::Arc;

use async_trait::async_trait;
use bitcoin::Amount;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::{ChainError, RpcError};
use crate::parser::BlockParser;
use crate::types::{Block, BlockHeader, BlockInfo, ChainInfo};

use super::transport::RpcTransport;
use super::BlockChain;

/// Generic Bitcoin-protocol RPC client.
pub struct BitcoinRpc {
    transport: Arc<dyn RpcTransport>,
    parser: Arc<dyn BlockParser>,
}

impl BitcoinRpc {
    pub fn new(transport: Arc<dyn RpcTransport>, parser: Arc<dyn BlockParser>) -> Self {
        Self { transport, parser }
    }
}

/// Match the node's block-not-found wording.
///
/// Classification is by exact message text only; the node does not use a
/// dedicated error code for this condition.
pub(crate) fn is_block_not_found(err: &RpcError) -> bool {
    matches!(
        err,
        RpcError::Server { message, .. }
            if message == "Block not found" || message == "Block height out of range"
    )
}

/// Reclassify a block-fetch failure: known not-found wording becomes
/// [`ChainError::BlockNotFound`]; anything else is annotated with the hash.
pub(crate) fn classify_block_error(hash: &str, err: RpcError) -> ChainError {
    if is_block_not_found(&err) {
        ChainError::BlockNotFound
    } else {
        ChainError::for_block(hash, err.into())
    }
}

pub(crate) async fn fetch_chain_info(
    transport: &dyn RpcTransport,
) -> Result<ChainInfo, ChainError> {
    let raw = transport.call("getblockchaininfo", Value::Null).await?;
    serde_json::from_value(raw).map_err(|e| {
        ChainError::Rpc(RpcError::InvalidResponse(format!(
            "invalid getblockchaininfo result: {e}"
        )))
    })
}

/// Assemble a full block from a header fetch and a raw-byte parse.
///
/// The header-only fetch does not carry transaction bytes, so its size field
/// (if present) is stale: take the size computed by the parse, assign the
/// fetched header, then restore the parsed size.
pub(crate) fn merge_block(
    parser: &dyn BlockParser,
    hash: &str,
    header: BlockHeader,
    raw: &[u8],
) -> Result<Block, ChainError> {
    let mut block = parser
        .parse_block(raw)
        .map_err(|e| ChainError::for_block(hash, e))?;
    let size = block.header.size;
    block.header = header;
    block.header.size = size;
    Ok(block)
}

#[async_trait]
impl BlockChain for BitcoinRpc {
    async fn initialize(&self) -> Result<(), ChainError> {
        let info = fetch_chain_info(self.transport.as_ref()).await?;
        info!(chain = %info.chain, blocks = info.blocks, "rpc: connected");
        Ok(())
    }

    async fn get_chain_info(&self) -> Result<ChainInfo, ChainError> {
        fetch_chain_info(self.transport.as_ref()).await
    }

    async fn get_block_hash(&self, height: u32) -> Result<String, ChainError> {
        debug!(height, "rpc: getblockhash");
        let raw = self
            .transport
            .call("getblockhash", json!({ "height": height }))
            .await
            .map_err(|err| {
                if is_block_not_found(&err) {
                    ChainError::BlockNotFound
                } else {
                    ChainError::Rpc(err)
                }
            })?;
        raw.as_str().map(str::to_owned).ok_or_else(|| {
            ChainError::Rpc(RpcError::InvalidResponse(format!(
                "getblockhash result is not a string: {raw}"
            )))
        })
    }

    async fn get_block_header(&self, hash: &str) -> Result<BlockHeader, ChainError> {
        debug!(%hash, "rpc: getblockheader");
        let raw = self
            .transport
            .call("getblockheader", json!({ "blockhash": hash, "verbose": true }))
            .await
            .map_err(|err| classify_block_error(hash, err))?;
        serde_json::from_value(raw).map_err(|e| {
            ChainError::for_block(
                hash,
                RpcError::InvalidResponse(format!("invalid getblockheader result: {e}")).into(),
            )
        })
    }

    async fn get_block(&self, hash: &str, height: u32) -> Result<Block, ChainError> {
        if hash.is_empty() && height == 0 {
            return Err(ChainError::MissingBlockRef);
        }
        let resolved;
        let hash = if hash.is_empty() {
            resolved = self.get_block_hash(height).await?;
            resolved.as_str()
        } else {
            hash
        };
        let header = self.get_block_header(hash).await?;
        let raw = self.get_block_raw(hash).await?;
        merge_block(self.parser.as_ref(), hash, header, &raw)
    }

    async fn get_block_raw(&self, hash: &str) -> Result<Vec<u8>, ChainError> {
        debug!(%hash, "rpc: getblock verbosity=0");
        let raw = self
            .transport
            .call("getblock", json!({ "blockhash": hash, "verbosity": 0 }))
            .await
            .map_err(|err| classify_block_error(hash, err))?;
        decode_block_hex(hash, &raw)
    }

    async fn get_block_info(&self, hash: &str) -> Result<BlockInfo, ChainError> {
        debug!(%hash, "rpc: getblock verbosity=1");
        let raw = self
            .transport
            .call("getblock", json!({ "blockhash": hash, "verbosity": 1 }))
            .await
            .map_err(|err| classify_block_error(hash, err))?;
        serde_json::from_value(raw).map_err(|e| {
            ChainError::for_block(
                hash,
                RpcError::InvalidResponse(format!("invalid getblock result: {e}")).into(),
            )
        })
    }

    async fn get_block_full(&self, hash: &str) -> Result<Block, ChainError> {
        // Full transaction bodies come from parsing the raw bytes; there is
        // no cheaper single-call path common to all bitcoind forks.
        self.get_block(hash, 0).await
    }

    async fn estimate_fee(&self, blocks: u32) -> Result<Amount, ChainError> {
        debug!(blocks, "rpc: estimatefee");
        let raw = self
            .transport
            .call("estimatefee", json!({ "nblocks": blocks }))
            .await?;
        let rate = raw.as_f64().ok_or_else(|| {
            ChainError::Rpc(RpcError::InvalidResponse(format!(
                "estimatefee result is not a number: {raw}"
            )))
        })?;
        self.parser.amount_to_sat(rate)
    }

    async fn estimate_smart_fee(
        &self,
        blocks: u32,
        conservative: bool,
    ) -> Result<Amount, ChainError> {
        debug!(blocks, conservative, "rpc: estimatesmartfee");
        let mode = if conservative {
            "CONSERVATIVE"
        } else {
            "ECONOMICAL"
        };
        let raw = self
            .transport
            .call(
                "estimatesmartfee",
                json!({ "conf_target": blocks, "estimate_mode": mode }),
            )
            .await?;
        let rate = raw.get("feerate").and_then(Value::as_f64).ok_or_else(|| {
            ChainError::Rpc(RpcError::InvalidResponse(format!(
                "estimatesmartfee result carries no feerate: {raw}"
            )))
        })?;
        self.parser.amount_to_sat(rate)
    }
}

/// Decode the hex payload of a non-verbose `getblock` result.
pub(crate) fn decode_block_hex(hash: &str, raw: &Value) -> Result<Vec<u8>, ChainError> {
    let encoded = raw.as_str().ok_or_else(|| {
        ChainError::for_block(
            hash,
            RpcError::InvalidResponse(format!("getblock result is not a hex string: {raw}"))
                .into(),
        )
    })?;
    hex::decode(encoded).map_err(|e| {
        ChainError::for_block(hash, ChainError::InvalidBlockData(format!("invalid block hex: {e}")))
    })
}
