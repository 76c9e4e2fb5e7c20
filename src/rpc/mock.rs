//! A mock [`RpcTransport`] for testing. Returns canned per-method responses
//! populated via the builder pattern and records every outbound call so tests
//! can assert on wire shapes and call counts.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RpcError;

use super::transport::RpcTransport;

#[derive(Clone)]
enum Canned {
    Result(Value),
    Server { code: i64, message: String },
    Transport(String),
}

pub struct MockTransport {
    responses: HashMap<String, Canned>,
    calls: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            responses: HashMap::new(),
        }
    }

    /// Shared handle to the recorded `(method, params)` log. Clone it out
    /// before moving the transport into a client.
    pub fn call_log(&self) -> Arc<Mutex<Vec<(String, Value)>>> {
        self.calls.clone()
    }
}

pub struct MockTransportBuilder {
    responses: HashMap<String, Canned>,
}

impl MockTransportBuilder {
    pub fn with_result(mut self, method: &str, result: Value) -> Self {
        self.responses
            .insert(method.to_owned(), Canned::Result(result));
        self
    }

    pub fn with_server_error(mut self, method: &str, code: i64, message: &str) -> Self {
        self.responses.insert(
            method.to_owned(),
            Canned::Server {
                code,
                message: message.to_owned(),
            },
        );
        self
    }

    pub fn with_transport_failure(mut self, method: &str, message: &str) -> Self {
        self.responses
            .insert(method.to_owned(), Canned::Transport(message.to_owned()));
        self
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            responses: self.responses,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        self.calls
            .lock()
            .expect("mock call log lock")
            .push((method.to_owned(), params));

        match self.responses.get(method) {
            Some(Canned::Result(value)) => Ok(value.clone()),
            Some(Canned::Server { code, message }) => Err(RpcError::Server {
                code: *code,
                message: message.clone(),
            }),
            Some(Canned::Transport(message)) => Err(RpcError::Transport(message.clone())),
            None => Err(RpcError::InvalidResponse(format!(
                "no canned response for `{method}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn records_calls_and_replays_canned_responses() {
        let mock = MockTransport::builder()
            .with_result("getblockcount", json!(42))
            .build();
        let calls = mock.call_log();

        let result = mock
            .call("getblockcount", Value::Null)
            .await
            .expect("canned result");
        assert_eq!(result, json!(42));

        let recorded = calls.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].0, "getblockcount");
    }

    #[tokio::test]
    async fn canned_server_error_surfaces_as_rpc_error() {
        let mock = MockTransport::builder()
            .with_server_error("getblock", -5, "Block not found")
            .build();

        let err = mock
            .call("getblock", json!({ "blockhash": "ab" }))
            .await
            .expect_err("canned error");
        assert!(matches!(err, RpcError::Server { code: -5, .. }));
    }

    #[tokio::test]
    async fn transport_failure_and_missing_method() {
        let mock = MockTransport::builder()
            .with_transport_failure("getblock", "connection reset")
            .build();

        assert!(matches!(
            mock.call("getblock", Value::Null).await,
            Err(RpcError::Transport(_))
        ));
        assert!(matches!(
            mock.call("unexpected", Value::Null).await,
            Err(RpcError::InvalidResponse(_))
        ));
    }
}
