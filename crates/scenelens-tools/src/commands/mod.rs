//! Line-protocol commands.

mod element_actions;
mod find_clickable;
mod inspect;

pub use element_actions::*;
pub use find_clickable::*;
pub use inspect::*;


use serde::de::DeserializeOwned;
use serde_json::Value;

use scenelens_protocols::command::CommandResponse;
use scenelens_protocols::error::CommandError;
use scenelens_protocols::types::Diagnostic;

pub(crate) fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, CommandError> {
    serde_json::from_value(params).map_err(|e| CommandError::InvalidParams(e.to_string()))
}

/// Attach `diagnostics` only when there is something to report.
pub(crate) fn with_diagnostics(
    response: CommandResponse,
    diagnostics: &[Diagnostic],
) -> CommandResponse {
    if diagnostics.is_empty() {
        response
    } else {
        response.with_serialized("diagnostics", &diagnostics)
    }
}
