//! Host collaborator interfaces.
//!
//! The live GUI owns the registry and scene store and mutates them without
//! any locking contract visible to readers. These traits expose point-in-time
//! copies only; implementations must return owned data.

mod snapshot;
mod traits;

pub use snapshot::*;
pub use traits::*;
