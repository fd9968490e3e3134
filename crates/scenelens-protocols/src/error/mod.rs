//! Error types for the scenelens protocol layer.

mod command;
mod host;
mod introspection;

pub use command::*;
pub use host::*;
pub use introspection::*;
