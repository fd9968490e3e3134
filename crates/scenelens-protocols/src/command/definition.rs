//! Command definition types.

use serde::{Deserialize, Serialize};

/// Definition of a command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDefinition {
    /// Value of the `action` field that selects this command.
    pub action: String,

    /// Description of what the command does.
    pub description: String,

    /// JSON Schema for the parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters_schema: Option<serde_json::Value>,
}

impl CommandDefinition {
    pub fn new(action: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            description: description.into(),
            parameters_schema: None,
        }
    }

    pub fn with_parameters_schema(mut self, schema: serde_json::Value) -> Self {
        self.parameters_schema = Some(schema);
        self
    }

    /// Names listed under the schema's `required` key.
    pub fn required_params(&self) -> Vec<&str> {
        self.parameters_schema
            .as_ref()
            .and_then(|s| s.get("required"))
            .and_then(|r| r.as_array())
            .map(|r| r.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default()
    }
}
