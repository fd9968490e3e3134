//! Command protocol definitions.
//!
//! Commands are the units a client invokes over the line protocol.

mod definition;
mod response;
mod traits;

pub use definition::*;
pub use response::*;
pub use traits::*;
