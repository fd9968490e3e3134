//! `find_clickable` command.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use scenelens_core::QueryEngine;
use scenelens_protocols::command::{Command, CommandDefinition, CommandResponse};
use scenelens_protocols::error::CommandError;

use super::{parse_params, with_diagnostics};

#[derive(Debug, Clone, Deserialize)]
pub struct FindClickableParams {
    #[serde(default)]
    pub filter: Option<String>,
}

/// List clickable elements with absolute geometry.
pub struct FindClickableCommand {
    definition: CommandDefinition,
    engine: Arc<QueryEngine>,
}

impl FindClickableCommand {
    pub fn new(engine: Arc<QueryEngine>) -> Self {
        Self {
            definition: CommandDefinition::new(
                "find_clickable",
                "List clickable semantic elements in viewport coordinates, optionally filtered by id",
            )
            .with_parameters_schema(json!({
                "type": "object",
                "properties": {
                    "filter": {
                        "type": "string",
                        "description": "Element id; 'foo' and ':foo' are equivalent"
                    }
                }
            })),
            engine,
        }
    }
}

#[async_trait]
impl Command for FindClickableCommand {
    fn definition(&self) -> &CommandDefinition {
        &self.definition
    }

    async fn execute(&self, params: serde_json::Value) -> Result<CommandResponse, CommandError> {
        let params: FindClickableParams = parse_params(params)?;
        let outcome = self.engine.find_clickable(params.filter.as_deref()).await?;

        for diagnostic in &outcome.diagnostics {
            warn!(kind = ?diagnostic.kind, graph_key = ?diagnostic.graph_key, "{}", diagnostic.message);
        }
        debug!(count = outcome.elements.len(), "find_clickable answered");

        let response = CommandResponse::ok()
            .with("count", json!(outcome.elements.len()))
            .with_serialized("elements", &outcome.elements);
        Ok(with_diagnostics(response, &outcome.diagnostics))
    }
}
