//! Line-protocol commands for scenelens.
//!
//! ## Commands
//! - `find_clickable` - List clickable elements in viewport coordinates
//! - `click_element` - Click an element's center
//! - `hover_element` - Move the pointer to an element's center
//! - `inspect_element` - Resolve one element and show its ancestor offsets
//!
//! ## Input
//! - [`EnigoDispatcher`] - Real pointer events
//! - [`DryRunDispatcher`] - Log only
//! - [`RecordingDispatcher`] - Capture events in memory

mod commands;
mod dispatch;
mod extension;
mod input;

pub use commands::*;
pub use dispatch::LineDispatcher;
pub use extension::IntrospectionCommands;
pub use input::{
    DispatchedPointer, DryRunDispatcher, EnigoDispatcher, InputController, InputError,
    RecordingDispatcher,
};
