//! `inspect_element` command.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use scenelens_core::QueryEngine;
use scenelens_protocols::command::{Command, CommandDefinition, CommandResponse};
use scenelens_protocols::error::CommandError;

use super::{parse_params, with_diagnostics};

#[derive(Debug, Clone, Deserialize)]
pub struct InspectParams {
    pub element_id: String,
}

/// Resolve one element, clickable or not, and show the ancestor chain.
pub struct InspectElementCommand {
    definition: CommandDefinition,
    engine: Arc<QueryEngine>,
}

impl InspectElementCommand {
    pub fn new(engine: Arc<QueryEngine>) -> Self {
        Self {
            definition: CommandDefinition::new(
                "inspect_element",
                "Resolve one element and report the ancestor offsets used",
            )
            .with_parameters_schema(json!({
                "type": "object",
                "properties": {
                    "element_id": { "type": "string" }
                },
                "required": ["element_id"]
            })),
            engine,
        }
    }
}

#[async_trait]
impl Command for InspectElementCommand {
    fn definition(&self) -> &CommandDefinition {
        &self.definition
    }

    async fn execute(&self, params: serde_json::Value) -> Result<CommandResponse, CommandError> {
        let params: InspectParams = parse_params(params)?;
        let inspection = self.engine.inspect(&params.element_id).await?;

        let mut response = CommandResponse::ok()
            .with_serialized("element", &inspection.element)
            .with_serialized("ancestors", &inspection.ancestors);
        if let Some(rendered) = inspection.owner_rendered {
            response = response.with("rendered", json!(rendered));
        }
        Ok(with_diagnostics(response, &inspection.diagnostics))
    }
}
