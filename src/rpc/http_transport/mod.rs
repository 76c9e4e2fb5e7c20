//! Native JSON-RPC transport for bitcoind-compatible endpoints.
//!
//! Implements [`RpcTransport`](super::RpcTransport) over HTTP(S) using
//! `reqwest`, with basic auth or bitcoind cookie-file credentials and
//! optional request rate limiting.

mod client;
mod connection;
mod protocol;

pub use client::HttpTransport;
