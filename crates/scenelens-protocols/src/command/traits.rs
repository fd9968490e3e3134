//! Command trait definition.

use async_trait::async_trait;

use super::{CommandDefinition, CommandResponse};
use crate::error::CommandError;

/// Core trait for line-protocol commands.
#[async_trait]
pub trait Command: Send + Sync {
    /// Returns the command definition.
    fn definition(&self) -> &CommandDefinition;

    /// Execute the command with the request object (including `action`).
    async fn execute(&self, params: serde_json::Value) -> Result<CommandResponse, CommandError>;

    /// Validate the parameters before execution.
    fn validate(&self, params: &serde_json::Value) -> Result<(), CommandError> {
        let Some(object) = params.as_object() else {
            return Err(CommandError::InvalidParams(
                "Request must be a JSON object".to_string(),
            ));
        };
        for name in self.definition().required_params() {
            match object.get(name) {
                Some(serde_json::Value::String(s)) if !s.is_empty() => {}
                Some(serde_json::Value::String(_)) => {
                    return Err(CommandError::InvalidParams(format!(
                        "'{}' must not be empty",
                        name
                    )));
                }
                Some(_) => {}
                None => {
                    return Err(CommandError::InvalidParams(format!(
                        "Missing required parameter '{}'",
                        name
                    )));
                }
            }
        }
        Ok(())
    }
}
