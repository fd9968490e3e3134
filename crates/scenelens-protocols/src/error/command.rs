//! Command execution errors.

use serde_json::json;
use thiserror::Error;

use super::IntrospectionError;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Introspection(#[from] IntrospectionError),
}

impl CommandError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownAction(_) => "unknown_action",
            Self::InvalidParams(_) => "invalid_params",
            Self::Introspection(err) => err.kind(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Introspection(err) => err.is_retryable(),
            _ => false,
        }
    }

    /// Render as the line-protocol error body.
    pub fn to_response(&self) -> serde_json::Value {
        json!({
            "status": "error",
            "error": self.to_string(),
            "kind": self.kind(),
            "retryable": self.is_retryable(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_action_response() {
        let err = CommandError::UnknownAction("fly".to_string());
        let body = err.to_response();
        assert_eq!(body["status"], "error");
        assert_eq!(body["kind"], "unknown_action");
        assert_eq!(body["retryable"], false);
        assert!(body["error"].as_str().unwrap().contains("fly"));
    }

    #[test]
    fn test_introspection_passthrough() {
        let err: CommandError = IntrospectionError::ElementNotFound("missing_id".to_string()).into();
        assert_eq!(err.kind(), "element_not_found");
        assert_eq!(err.to_string(), "Element not found: missing_id");
    }

    #[test]
    fn test_timeout_response_retryable() {
        let err: CommandError = IntrospectionError::HostTimeout {
            operation: "topology read".to_string(),
            timeout_ms: 50,
        }
        .into();
        assert_eq!(err.to_response()["retryable"], true);
    }
}
