//! DeVault blockchain adapter.
//!
//! Specializes a generic Bitcoin-style JSON-RPC client for the DeVault node:
//! block retrieval (raw and verbose), block-not-found classification, and the
//! version-dependent fee-estimation fallback. The adapter exposes one uniform
//! blockchain-access contract ([`rpc::BlockChain`]) to the indexing layer
//! above it; everything DeVault does not override is delegated straight
//! through to the base client.

pub mod chain;
pub mod config;
pub mod error;
pub mod parser;
pub mod rpc;
pub mod types;

pub use config::Config;
pub use error::{ChainError, RpcError};
pub use rpc::{BlockChain, DeVaultRpc, HttpTransport};
