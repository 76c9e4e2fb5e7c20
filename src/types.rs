//! Domain types shared between the RPC layer and the block parser.

use bitcoin::Transaction;
use serde::{Deserialize, Serialize};

/// Basic chain information from `getblockchaininfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainInfo {
    /// Symbolic chain name (`main`, `test`, `regtest`).
    pub chain: String,
    #[serde(default)]
    pub blocks: u64,
    #[serde(default)]
    pub headers: u64,
    #[serde(rename = "bestblockhash", default)]
    pub best_block_hash: String,
}

/// Canonical block header fields as returned by `getblockheader`.
///
/// Every field defaults: forks disagree about which optional fields they
/// emit, and a header-only fetch carries no payload-size guarantee at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockHeader {
    #[serde(default)]
    pub hash: String,
    #[serde(rename = "previousblockhash", default)]
    pub prev: Option<String>,
    #[serde(rename = "nextblockhash", default)]
    pub next: Option<String>,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub confirmations: i64,
    /// Size in bytes. Header-only fetches do not carry transaction bytes, so
    /// this is only authoritative when computed from a raw-block parse.
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub time: i64,
}

/// A fully parsed block: canonical header plus decoded transactions.
#[derive(Debug, Clone)]
pub struct Block {
    pub header: BlockHeader,
    pub txs: Vec<Transaction>,
}

/// Verbose block metadata from `getblock verbose=true`: header-level detail
/// plus the txid list, without full transaction bodies.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockInfo {
    #[serde(flatten)]
    pub header: BlockHeader,
    #[serde(default)]
    pub version: i64,
    #[serde(rename = "merkleroot", default)]
    pub merkle_root: String,
    #[serde(default)]
    pub nonce: u64,
    #[serde(default)]
    pub bits: String,
    #[serde(default)]
    pub difficulty: f64,
    #[serde(rename = "tx", default)]
    pub txids: Vec<String>,
}
