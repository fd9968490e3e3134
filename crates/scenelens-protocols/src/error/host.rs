//! Errors reported by host-side collaborators.

use thiserror::Error;

/// Failure of a host collaborator (registry, topology or input).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum HostError {
    #[error("Host unavailable: {0}")]
    Unavailable(String),

    #[error("Input dispatch failed: {0}")]
    Input(String),
}
