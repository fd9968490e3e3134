//! Shared domain types.

mod diagnostic;
mod element;
mod geometry;
mod graph;
mod ident;

pub use diagnostic::*;
pub use element::*;
pub use geometry::*;
pub use graph::*;
pub use ident::*;

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
