//! Command set registration.

use std::sync::Arc;

use scenelens_core::{ActionFacade, CommandRegistry, RegistryError};

use crate::commands::*;

/// The introspection command set, bound to one engine and dispatcher.
pub struct IntrospectionCommands {
    facade: Arc<ActionFacade>,
}

impl IntrospectionCommands {
    pub fn new(facade: Arc<ActionFacade>) -> Self {
        Self { facade }
    }

    /// Actions this set provides.
    pub fn provides() -> &'static [&'static str] {
        &[
            "find_clickable",
            "click_element",
            "hover_element",
            "inspect_element",
        ]
    }

    pub fn register(&self, registry: &CommandRegistry) -> Result<(), RegistryError> {
        let engine = self.facade.engine().clone();
        registry.register(Arc::new(FindClickableCommand::new(engine.clone())))?;
        registry.register(Arc::new(ClickElementCommand::new(self.facade.clone())))?;
        registry.register(Arc::new(HoverElementCommand::new(self.facade.clone())))?;
        registry.register(Arc::new(InspectElementCommand::new(engine)))?;
        Ok(())
    }

    /// Fresh registry holding only this set.
    pub fn into_registry(self) -> Result<CommandRegistry, RegistryError> {
        let registry = CommandRegistry::new();
        self.register(&registry)?;
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenelens_core::{EngineSettings, LiveViewport, QueryEngine};

    use crate::input::DryRunDispatcher;

    fn commands() -> IntrospectionCommands {
        let viewport = Arc::new(LiveViewport::new());
        let engine = Arc::new(QueryEngine::new(
            viewport.clone(),
            viewport,
            EngineSettings::default(),
        ));
        IntrospectionCommands::new(Arc::new(ActionFacade::new(
            engine,
            Arc::new(DryRunDispatcher),
        )))
    }

    #[test]
    fn test_registers_every_provided_action() {
        let registry = commands().into_registry().unwrap();
        assert_eq!(registry.len(), IntrospectionCommands::provides().len());
        for action in IntrospectionCommands::provides() {
            assert!(registry.contains(action), "missing {}", action);
        }
    }

    #[test]
    fn test_double_registration_fails() {
        let commands = commands();
        let registry = CommandRegistry::new();
        commands.register(&registry).unwrap();
        assert!(matches!(
            commands.register(&registry),
            Err(RegistryError::AlreadyRegistered(_))
        ));
    }
}
