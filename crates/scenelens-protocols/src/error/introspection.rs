//! Introspection error taxonomy.

use thiserror::Error;

use super::HostError;

/// Every failure the engine can report.
///
/// Internal failures are converted into one of these kinds before they
/// reach a command response.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IntrospectionError {
    #[error("Semantic registry is not available")]
    NoRegistry,

    #[error("Scene topology is not available")]
    NoTopology,

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Element '{id}' has unresolvable geometry: {reason}")]
    InvalidElementGeometry { id: String, reason: String },

    #[error("Ancestor chain of '{graph_key}' exceeded depth limit {limit}")]
    DepthLimitExceeded { graph_key: String, limit: usize },

    #[error("Host {operation} timed out after {timeout_ms}ms")]
    HostTimeout { operation: String, timeout_ms: u64 },

    #[error("Host unavailable: {0}")]
    HostUnavailable(String),

    #[error("Input dispatch failed: {0}")]
    InputDispatch(String),
}

impl IntrospectionError {
    /// Stable snake_case code used in wire responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoRegistry => "no_registry",
            Self::NoTopology => "no_topology",
            Self::ElementNotFound(_) => "element_not_found",
            Self::InvalidElementGeometry { .. } => "invalid_element_geometry",
            Self::DepthLimitExceeded { .. } => "depth_limit_exceeded",
            Self::HostTimeout { .. } => "host_timeout",
            Self::HostUnavailable(_) => "host_unavailable",
            Self::InputDispatch(_) => "input_dispatch",
        }
    }

    /// Whether a client may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::HostTimeout { .. } | Self::HostUnavailable(_))
    }
}

impl From<HostError> for IntrospectionError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::Unavailable(msg) => Self::HostUnavailable(msg),
            HostError::Input(msg) => Self::InputDispatch(msg),
        }
    }
}
