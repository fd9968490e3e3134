//! # scenelens Protocols
//!
//! Core protocol definitions for the scenelens introspection bridge.
//! Contains only types and interface definitions - no engine logic.
//!
//! ## Core Traits
//!
//! - [`RegistrySource`] - Point-in-time reads of the host's semantic registry
//! - [`TopologySource`] - Point-in-time reads of the host's scene graph store
//! - [`InputDispatcher`] - Synthetic pointer input at absolute coordinates
//! - [`Command`] - A line-protocol command (`find_clickable`, `click_element`, ...)

pub mod command;
pub mod error;
pub mod host;
pub mod types;

// Re-export core traits
pub use command::{Command, CommandDefinition, CommandResponse};
pub use error::{CommandError, HostError, IntrospectionError};
pub use host::{InputDispatcher, PointerIntent, RawRegistryEntry, RegistrySource, TopologySource};
pub use types::*;
