//! Error taxonomy for the adapter.
//!
//! [`RpcError`] covers the transport layer (connectivity, malformed
//! envelopes, structured server errors). [`ChainError`] is the adapter's own
//! contract: not-found classification, capability gaps, and hash-annotated
//! failures. The adapter never recovers locally; it only reclassifies and
//! annotates before returning to the caller.

/// JSON-RPC transport and envelope failures.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// Connectivity or serialization failure before a JSON-RPC envelope was
    /// obtained.
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("invalid JSON-RPC response: {0}")]
    InvalidResponse(String),

    /// Structured error reported by the node itself.
    #[error("node error {code}: {message}")]
    Server { code: i64, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// The requested block does not exist at the given hash or height.
    /// Callers treat this as "not yet synced", not as a failure.
    #[error("block not found")]
    BlockNotFound,

    /// Neither a hash nor a positive height was supplied.
    #[error("block hash or height required")]
    MissingBlockRef,

    /// A block or fee operation was called before `initialize` completed.
    #[error("adapter not initialized")]
    NotInitialized,

    /// Capability the target node does not expose.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("invalid block data: {0}")]
    InvalidBlockData(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Any failure annotated with the hash of the block being fetched.
    #[error("block {hash}: {source}")]
    Block {
        hash: String,
        #[source]
        source: Box<ChainError>,
    },

    #[error(transparent)]
    Rpc(#[from] RpcError),
}

impl ChainError {
    /// Attach the requested block hash to an error for diagnosis.
    pub(crate) fn for_block(hash: &str, source: ChainError) -> Self {
        Self::Block {
            hash: hash.to_owned(),
            source: Box::new(source),
        }
    }
}
