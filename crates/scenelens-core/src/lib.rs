//! # scenelens Core
//!
//! Introspection engine for the scenelens bridge.
//!
//! ## Components
//!
//! - [`RegistryReader`] - Decodes raw registry rows (flat and nested shapes)
//! - [`Topology`] - Parent links and transforms from one scene snapshot
//! - [`VersionResolver`] - Picks one registration per element id
//! - [`TransformAccumulator`] - Walks ancestors and sums translations
//! - [`QueryEngine`] - `find_clickable` and `inspect` over fresh snapshots
//! - [`ActionFacade`] - Click and hover at a resolved element's center
//! - [`LiveViewport`] - In-process registry and scene store
//! - [`CommandRegistry`] - Action name to command lookup

mod bounded;

pub mod actions;
pub mod live;
pub mod query;
pub mod registry;
pub mod registry_reader;
pub mod resolver;
pub mod topology;
pub mod transform;

pub use actions::{ActionFacade, ActionOutcome, ScreenPoint};
pub use live::{LiveViewport, SceneError, SceneFile};
pub use query::{EngineSettings, Inspection, QueryEngine, QueryOutcome};
pub use registry::{CommandRegistry, RegistryError};
pub use registry_reader::{RegistryRead, RegistryReader};
pub use resolver::VersionResolver;
pub use topology::Topology;
pub use transform::{Accumulation, AncestorStep, DEFAULT_DEPTH_LIMIT, TransformAccumulator};
