//! Line-protocol dispatch.
//!
//! One request line in, one response line out. Every failure, including
//! malformed JSON, becomes an error body; nothing here can end a connection.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use scenelens_core::CommandRegistry;
use scenelens_protocols::error::CommandError;

pub struct LineDispatcher {
    registry: Arc<CommandRegistry>,
}

impl LineDispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    /// Answer one request line with one compact JSON line (no newline).
    pub async fn handle_line(&self, line: &str) -> String {
        let response = match serde_json::from_str::<Value>(line.trim()) {
            Ok(request) => self.handle_value(request).await,
            Err(e) => CommandError::InvalidParams(format!("Malformed JSON: {}", e)).to_response(),
        };
        response.to_string()
    }

    /// Answer one raw request line. Bytes that are not UTF-8 get an
    /// `invalid_params` body like any other unreadable request.
    pub async fn handle_bytes(&self, line: &[u8]) -> String {
        match std::str::from_utf8(line) {
            Ok(text) => self.handle_line(text).await,
            Err(e) => {
                warn!(error = %e, "Request line is not valid UTF-8");
                CommandError::InvalidParams(format!("Request is not valid UTF-8: {}", e))
                    .to_response()
                    .to_string()
            }
        }
    }

    /// Answer a parsed request.
    pub async fn handle_value(&self, request: Value) -> Value {
        match self.execute(request).await {
            Ok(value) => value,
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "Command failed");
                err.to_response()
            }
        }
    }

    async fn execute(&self, request: Value) -> Result<Value, CommandError> {
        let action = request
            .get("action")
            .and_then(Value::as_str)
            .ok_or_else(|| CommandError::InvalidParams("Missing 'action' field".to_string()))?
            .to_string();

        let command = self
            .registry
            .get(&action)
            .ok_or_else(|| CommandError::UnknownAction(action.clone()))?;

        debug!(action = %action, "Dispatching command");
        command.validate(&request)?;
        Ok(command.execute(request).await?.into_value())
    }
}
