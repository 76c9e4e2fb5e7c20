//! Blockchain access layer.
//!
//! Defines the [`BlockChain`] capability trait, the generic bitcoind-style
//! base client ([`BitcoinRpc`]), the DeVault adapter ([`DeVaultRpc`]) that
//! wraps it, the [`RpcTransport`] seam, and the HTTP JSON-RPC transport
//! ([`HttpTransport`]) plus a test mock (`mock::MockTransport`).

mod base;
mod devault;
mod http_transport;
#[cfg(test)]
pub mod mock;
mod transport;

pub use base::BitcoinRpc;
pub use devault::DeVaultRpc;
pub use http_transport::HttpTransport;
pub use transport::RpcTransport;

use async_trait::async_trait;
use bitcoin::Amount;

use crate::error::ChainError;
use crate::types::{Block, BlockHeader, BlockInfo, ChainInfo};

/// Uniform blockchain-access contract exposed to the indexing layer.
///
/// One trait covers the whole capability set; the base client implements it
/// with generic bitcoind semantics and per-coin adapters wrap the base,
/// delegating unmodified operations straight through and overriding the rest.
///
/// Every operation other than `initialize` is safe to call concurrently once
/// `initialize` has completed; calling them earlier fails with
/// [`ChainError::NotInitialized`]. No operation retries, times out, or
/// recovers locally; failures are reclassified or annotated and returned.
#[async_trait]
pub trait BlockChain: Send + Sync {
    /// Resolve chain identity and install the block parser. Must complete
    /// successfully exactly once before any other operation is used.
    async fn initialize(&self) -> Result<(), ChainError>;

    /// Fetch basic chain info (chain name, block count, best hash).
    async fn get_chain_info(&self) -> Result<ChainInfo, ChainError>;

    /// Resolve a block height to its hash.
    async fn get_block_hash(&self, height: u32) -> Result<String, ChainError>;

    /// Fetch canonical header fields for a block. No payload-size guarantee.
    async fn get_block_header(&self, hash: &str) -> Result<BlockHeader, ChainError>;

    /// Fetch a fully parsed block by hash, or by height when `hash` is empty.
    async fn get_block(&self, hash: &str, height: u32) -> Result<Block, ChainError>;

    /// Fetch a block's raw encoded bytes.
    async fn get_block_raw(&self, hash: &str) -> Result<Vec<u8>, ChainError>;

    /// Fetch verbose block metadata (header detail plus txid list).
    async fn get_block_info(&self, hash: &str) -> Result<BlockInfo, ChainError>;

    /// Fetch a block with full verbose transaction bodies, where the node
    /// supports it in a single call.
    async fn get_block_full(&self, hash: &str) -> Result<Block, ChainError>;

    /// Estimate the fee per kilobyte for confirmation within `blocks` blocks,
    /// in satoshis.
    async fn estimate_fee(&self, blocks: u32) -> Result<Amount, ChainError>;

    /// Smart fee estimation honoring a conservativeness preference, where the
    /// node supports it.
    async fn estimate_smart_fee(
        &self,
        blocks: u32,
        conservative: bool,
    ) -> Result<Amount, ChainError>;
}
