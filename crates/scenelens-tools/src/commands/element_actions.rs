//! `click_element` and `hover_element` commands.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use scenelens_core::ActionFacade;
use scenelens_protocols::command::{Command, CommandDefinition, CommandResponse};
use scenelens_protocols::error::CommandError;

use super::{parse_params, with_diagnostics};

#[derive(Debug, Clone, Deserialize)]
pub struct ElementActionParams {
    pub element_id: String,
}

fn element_id_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "element_id": {
                "type": "string",
                "description": "Id of a clickable element"
            }
        },
        "required": ["element_id"]
    })
}

// ============================================================================
// Click Element Command
// ============================================================================

/// Click the center of a clickable element.
pub struct ClickElementCommand {
    definition: CommandDefinition,
    facade: Arc<ActionFacade>,
}

impl ClickElementCommand {
    pub fn new(facade: Arc<ActionFacade>) -> Self {
        Self {
            definition: CommandDefinition::new(
                "click_element",
                "Click the center of a clickable element",
            )
            .with_parameters_schema(element_id_schema()),
            facade,
        }
    }
}

#[async_trait]
impl Command for ClickElementCommand {
    fn definition(&self) -> &CommandDefinition {
        &self.definition
    }

    async fn execute(&self, params: serde_json::Value) -> Result<CommandResponse, CommandError> {
        let params: ElementActionParams = parse_params(params)?;
        let outcome = self.facade.click_element(&params.element_id).await?;

        let response = CommandResponse::ok()
            .with(
                "message",
                json!(format!(
                    "Clicked '{}' at ({}, {})",
                    outcome.element.id(),
                    outcome.position.x,
                    outcome.position.y
                )),
            )
            .with_serialized("clicked_at", &outcome.position);
        Ok(with_diagnostics(response, &outcome.diagnostics))
    }
}

// ============================================================================
// Hover Element Command
// ============================================================================

/// Move the pointer over a clickable element without clicking.
pub struct HoverElementCommand {
    definition: CommandDefinition,
    facade: Arc<ActionFacade>,
}

impl HoverElementCommand {
    pub fn new(facade: Arc<ActionFacade>) -> Self {
        Self {
            definition: CommandDefinition::new(
                "hover_element",
                "Move the pointer to the center of a clickable element",
            )
            .with_parameters_schema(element_id_schema()),
            facade,
        }
    }
}

#[async_trait]
impl Command for HoverElementCommand {
    fn definition(&self) -> &CommandDefinition {
        &self.definition
    }

    async fn execute(&self, params: serde_json::Value) -> Result<CommandResponse, CommandError> {
        let params: ElementActionParams = parse_params(params)?;
        let outcome = self.facade.hover_element(&params.element_id).await?;

        let response = CommandResponse::ok()
            .with(
                "message",
                json!(format!(
                    "Hovering '{}' at ({}, {})",
                    outcome.element.id(),
                    outcome.position.x,
                    outcome.position.y
                )),
            )
            .with_serialized("position", &outcome.position);
        Ok(with_diagnostics(response, &outcome.diagnostics))
    }
}
